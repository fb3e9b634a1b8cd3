// Lifecycle states of the browser-side stream session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Streaming,
    Disconnected,
    Error,
}

// UI panels the view can show; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Connecting,
    Streaming,
    Disconnected,
    Error,
}

// Callbacks raised by the streaming SDK, delivered as values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkEvent {
    ConnectionState(String),
    ChannelError(String),
    ServerDisconnect(String),
    ApplicationMessage(Vec<u8>),
}

impl SdkEvent {
    pub const DISCONNECTED: &'static str = "disconnected";
    pub const TERMINATED: &'static str = "terminated";
}
