//! `bnpl get <resource>`.

use anyhow::Result;
use bnpl_admin::model::Page;
use bnpl_admin::{search_target, Resource};
use bnpl_client::RequestOptions;
use bnpl_core::truncate;
use serde_json::Value;

use super::{open, Context};

pub async fn get(ctx: &Context, resource: &str, search: Option<&str>, page: Option<u32>) -> Result<()> {
    let resource: Resource = resource.parse().map_err(anyhow::Error::msg)?;
    let app = open(ctx).await?;

    let mut request = RequestOptions::get();
    if let Some(page) = page {
        request = request.query("page", page.to_string());
    }
    let hook = app.list::<Value>(resource, app.fetch_options().manual().request(request));
    hook.fetch_data(Some(&search_target(resource, search.unwrap_or("")))).await;

    let state = hook.state();
    if let Some(err) = state.error {
        anyhow::bail!("{} ({})", err, err.error_code());
    }
    let page = state.data.unwrap_or_default();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render_page(&page));
    }
    Ok(())
}

const LABEL_WIDTH: usize = 48;

/// `id  label` rows followed by a page footer.
pub fn render_page(page: &Page<Value>) -> String {
    let mut out = String::new();
    for item in &page.items {
        let id = item.get("id").or_else(|| item.get("code")).map(plain).unwrap_or_default();
        out.push_str(&format!("{:<12} {}\n", id, label(item)));
    }
    out.push_str(&format!(
        "-- page {}/{}, {} total\n",
        page.page,
        page.page_count(),
        page.total
    ));
    out
}

fn label(item: &Value) -> String {
    ["fullName", "name", "model"]
        .iter()
        .find_map(|key| item.get(*key))
        .map(|v| truncate(&plain(v), LABEL_WIDTH))
        .unwrap_or_default()
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
