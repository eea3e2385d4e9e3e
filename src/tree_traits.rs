//! Terminal rendering of the organization forest.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{build_tree, TreeItem, TreeResult};
use crate::form::{FormMemberField, FormOrgField, FormValues};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

fn org_label(org: &FormOrgField) -> String {
    if org.name.is_empty() {
        format!("<unnamed> [{}]", org.identifier)
    } else {
        format!("{} [{}]", org.name, org.identifier)
    }
}

fn member_label(member: &FormMemberField) -> String {
    let mut label = format!("- {}", member.name);
    if let Some(age) = member.age {
        label.push_str(&format!(" ({age})"));
    }
    if member.representation {
        label.push_str(" *");
    }
    if !member.activated {
        label.push_str(" (inactive)");
    }
    label
}

impl TreeNodeConvert for TreeItem<&FormOrgField> {
    fn to_tree_string(&self) -> Tree<String> {
        // Members first, then child organizations
        let members = self
            .item
            .members
            .iter()
            .map(|m| Tree::new(member_label(m)));
        let children = self.children.iter().map(|c| c.to_tree_string());
        Tree::new(org_label(self.item)).with_leaves(members.chain(children))
    }
}

/// Render all organizations under a single synthetic root.
#[instrument(level = "debug", skip(values))]
pub fn forest_to_tree(values: &FormValues) -> TreeResult<Tree<String>> {
    let roots = build_tree(values.orgs.iter())?;
    let leaves: Vec<_> = roots.iter().map(|r| r.to_tree_string()).collect();
    Ok(Tree::new("organizations".to_string()).with_leaves(leaves))
}
