#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendRequest(crate::OutboundRequest),
    Notify(Notice),
}

/// Signals for user actions that were refused without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SubmitRejectedWhilePending { in_flight: crate::RequestId },
    RemoveRefused { id: crate::SourceId },
}
