//! The three calculate operations of the plugin protocol.
//!
//! Each handler pulls the well-known keys out of the raw input map,
//! checks the caller-side preconditions, and hands the rest to the
//! plugin. The volume request itself travels at the top level of the
//! input under the `volumes` / `volume-request` / `volumes-request`
//! aliases.

use anyhow::bail;

use hostgrid_core::{RawParams, VolumeError};
use hostgrid_plugin::Plugin;

use crate::dispatch;

pub fn deploy(plugin: &Plugin) -> anyhow::Result<()> {
    let params = dispatch::read_params()?;
    let nodename = require_nodename(&params)?;

    let deploy_count = params.i64("deploy_count");
    if deploy_count < 0 {
        bail!("deploy_count must be non-negative: {deploy_count}");
    }

    let response = plugin.calculate_deploy(&nodename, deploy_count as usize, &params)?;
    dispatch::write_response(&response)
}

pub fn realloc(plugin: &Plugin) -> anyhow::Result<()> {
    let params = dispatch::read_params()?;
    let nodename = require_nodename(&params)?;

    let resource = params.raw_params("workloads_resource");
    let response = plugin.calculate_realloc(&nodename, &resource, &params)?;
    dispatch::write_response(&response)
}

pub fn remap(plugin: &Plugin) -> anyhow::Result<()> {
    let params = dispatch::read_params()?;
    let nodename = require_nodename(&params)?;

    let workloads_resource = params.raw_params_map("workloads_resource");
    let response = plugin.calculate_remap(&nodename, &workloads_resource)?;
    dispatch::write_response(&response)
}

fn require_nodename(params: &RawParams) -> Result<String, VolumeError> {
    let nodename = params.string("nodename");
    if nodename.is_empty() {
        return Err(VolumeError::EmptyNodeName);
    }
    Ok(nodename)
}
