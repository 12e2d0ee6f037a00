use hostgrid_plugin::Plugin;

use crate::dispatch;

pub fn description(plugin: &Plugin) -> anyhow::Result<()> {
    dispatch::write_response(&plugin.metrics_description())
}

pub fn get_metrics(plugin: &Plugin) -> anyhow::Result<()> {
    let params = dispatch::read_params()?;
    let podname = params.string("podname");
    let nodename = params.string("nodename");
    dispatch::write_response(&plugin.metrics(&podname, &nodename))
}
