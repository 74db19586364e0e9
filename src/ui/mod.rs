pub mod line;
pub mod status_bar;

use anyhow::Result;

/// Where the label ends up. Creation is the implementor's constructor;
/// `destroy` releases whatever the sink holds and is safe to call twice.
pub trait DisplaySink {
    fn set_text(&mut self, text: &str) -> Result<()>;

    fn destroy(&mut self) -> Result<()>;
}
