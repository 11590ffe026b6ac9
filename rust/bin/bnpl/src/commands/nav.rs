//! `bnpl menu`, `bnpl home`, `bnpl check`, `bnpl route`.

use anyhow::Result;
use bnpl_admin::{NavNode, RouteDecision};

use super::{open, Context};

pub async fn menu(ctx: &Context, all: bool) -> Result<()> {
    let app = open(ctx).await?;
    let tree = if all { app.menu() } else { app.visible_menu() };
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}

pub async fn home(ctx: &Context) -> Result<()> {
    let app = open(ctx).await?;
    println!("{}", app.home_route());
    Ok(())
}

pub async fn check(ctx: &Context, action: &str, subject: &str) -> Result<()> {
    let app = open(ctx).await?;
    let permissions = app.session().permissions();
    let granted = permissions.checker().has_permission(action, subject);
    if ctx.json {
        println!(
            "{}",
            serde_json::json!({ "action": action, "subject": subject, "granted": granted })
        );
    } else {
        println!("{}:{} {}", action, subject, if granted { "granted" } else { "denied" });
    }
    Ok(())
}

pub async fn route(ctx: &Context, path: &str) -> Result<()> {
    let app = open(ctx).await?;
    match app.navigate(path) {
        RouteDecision::Allow => println!("{} allowed", path),
        RouteDecision::Redirect(to) => println!("{} -> {}", path, to),
    }
    Ok(())
}

/// Indented outline of a navigation tree, one node per line.
pub fn render_tree(nodes: &[NavNode]) -> String {
    let mut out = String::new();
    render_into(nodes, 0, &mut out);
    out
}

fn render_into(nodes: &[NavNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            NavNode::Section(s) => out.push_str(&format!("{}[{}]\n", indent, s.title)),
            NavNode::Link(l) => out.push_str(&format!("{}{}  {}\n", indent, l.title, l.path)),
            NavNode::Group(g) => {
                match &g.path {
                    Some(path) => out.push_str(&format!("{}{}/  {}\n", indent, g.title, path)),
                    None => out.push_str(&format!("{}{}/\n", indent, g.title)),
                }
                render_into(&g.children, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bnpl_admin::{NavGroup, NavLink, NavSection};

    use super::*;

    #[test]
    fn renders_outline() {
        let tree: Vec<NavNode> = vec![
            NavSection::new("Sales").into(),
            NavLink::new("Clients", "/clients").into(),
            NavGroup::new("Staff", vec![NavLink::new("Branches", "/staff/branches").into()]).into(),
        ];
        assert_eq!(
            render_tree(&tree),
            "[Sales]\nClients  /clients\nStaff/\n  Branches  /staff/branches\n"
        );
    }
}
