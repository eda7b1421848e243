//! Two-way text bridge between the page and a native host.
//!
//! Outbound messages go through [`BridgeSender`]; when no host channel was
//! found at startup they are mirrored to the log and the status element so the
//! traffic stays visible in a plain browser. Inbound calls arrive as
//! [`HostCommand`]s and are applied by [`BridgeReceiver`].

use std::rc::Rc;

use crate::app::AppContext;
use crate::renderer::Renderer;

/// Acknowledgement sent after the start command.
pub const START_ACK: &str = "Animation started";
/// Acknowledgement sent after the reset command.
pub const RESET_ACK: &str = "Scene reset";

/// Global function names the native host evaluates. These are a contract with
/// the host app and must not change.
pub const START_ENTRY_POINT: &str = "startAnimation";
pub const RESET_ENTRY_POINT: &str = "resetScene";
pub const PUSH_TEXT_ENTRY_POINT: &str = "messageFromIOS";

/// Outbound channel to the native host. Delivery is fire-and-forget.
pub trait MessageChannel {
    fn post_message(&self, message: &str);
}

/// Page element that displays bridge text.
pub trait StatusDisplay {
    fn set_text(&self, text: &str);
}

/// Sends messages to the host, or echoes them locally when not hosted.
pub struct BridgeSender {
    channel: Option<Box<dyn MessageChannel>>,
    status: Rc<dyn StatusDisplay>,
}

impl BridgeSender {
    /// `channel` is resolved once by the caller; `None` means the page is not
    /// running inside a native host.
    pub fn new(channel: Option<Box<dyn MessageChannel>>, status: Rc<dyn StatusDisplay>) -> Self {
        Self { channel, status }
    }

    pub fn is_hosted(&self) -> bool {
        self.channel.is_some()
    }

    pub fn send(&self, message: &str) {
        match &self.channel {
            Some(channel) => {
                log::debug!("Posting to host: {message}");
                channel.post_message(message);
            }
            None => {
                log::info!("[iOS MOCK] {message}");
                self.status.set_text(message);
            }
        }
    }
}

/// A call made by the host into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Start,
    Reset,
    PushText(String),
}

impl HostCommand {
    /// Name of the global function that issues this command.
    pub fn entry_point(&self) -> &'static str {
        match self {
            HostCommand::Start => START_ENTRY_POINT,
            HostCommand::Reset => RESET_ENTRY_POINT,
            HostCommand::PushText(_) => PUSH_TEXT_ENTRY_POINT,
        }
    }
}

/// Applies host commands to the application context.
pub struct BridgeReceiver {
    sender: BridgeSender,
    status: Rc<dyn StatusDisplay>,
}

impl BridgeReceiver {
    pub fn new(sender: BridgeSender, status: Rc<dyn StatusDisplay>) -> Self {
        Self { sender, status }
    }

    pub fn sender(&self) -> &BridgeSender {
        &self.sender
    }

    pub fn dispatch<R: Renderer>(&self, ctx: &mut AppContext<R>, command: HostCommand) {
        log::debug!("Host called {}", command.entry_point());
        match command {
            HostCommand::Start => {
                ctx.reset_cube();
                self.sender.send(START_ACK);
            }
            HostCommand::Reset => {
                ctx.reset_cube();
                self.sender.send(RESET_ACK);
            }
            HostCommand::PushText(text) => self.status.set_text(&text),
        }
    }
}
