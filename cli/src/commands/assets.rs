use crate::output;
use crate::state::AppState;
use anyhow::{Context, Result};
use assetscan_api::Asset;
use std::io::Write;

fn print_assets(assets: &[Asset], out: &mut impl Write) -> Result<()> {
    if assets.is_empty() {
        writeln!(out, "No assets found")?;
        return Ok(());
    }
    for asset in assets {
        writeln!(out, "{}", output::asset_line(asset))?;
    }
    Ok(())
}

pub async fn list(state: &AppState, out: &mut impl Write) -> Result<()> {
    let assets = state
        .assets()
        .list()
        .await
        .context("Failed to list assets")?;
    print_assets(&assets, out)
}

pub async fn get(state: &AppState, id: &str, out: &mut impl Write) -> Result<()> {
    let asset = state
        .assets()
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch asset {id}"))?;
    writeln!(out, "{}", output::asset_detail(&asset))?;
    Ok(())
}

pub async fn by_type(state: &AppState, asset_type: &str, out: &mut impl Write) -> Result<()> {
    let assets = state
        .assets()
        .by_type(asset_type)
        .await
        .with_context(|| format!("Failed to list assets of type {asset_type}"))?;
    print_assets(&assets, out)
}

pub async fn by_online(state: &AppState, online: bool, out: &mut impl Write) -> Result<()> {
    let assets = state
        .assets()
        .by_online(online)
        .await
        .context("Failed to list assets by status")?;
    print_assets(&assets, out)
}
