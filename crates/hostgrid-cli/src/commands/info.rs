use hostgrid_plugin::Plugin;

use crate::dispatch;

pub fn name(plugin: &Plugin) -> anyhow::Result<()> {
    dispatch::write_response(&plugin.name())
}
