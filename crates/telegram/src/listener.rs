use std::{
    convert::Infallible,
    pin::Pin,
    task::{Context, Poll},
};

use futures_util::Stream;
use teloxide::{
    stop::{mk_stop_token, StopToken},
    types::Update,
    update_listeners::{StatefulListener, UpdateListener},
};
use tokio::sync::mpsc;

/// Receiving half of the webhook queue, exposed as an update stream.
#[derive(Debug)]
pub struct InboundUpdates {
    rx: mpsc::Receiver<Update>,
}

impl InboundUpdates {
    pub fn new(rx: mpsc::Receiver<Update>) -> Self {
        Self { rx }
    }
}

impl Stream for InboundUpdates {
    type Item = Result<Update, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|update| update.map(Ok))
    }
}

/// Wraps the webhook queue into a listener the teloxide dispatcher accepts.
pub fn webhook_listener(inbound: InboundUpdates) -> impl UpdateListener<Err = Infallible> + Send {
    fn stream(state: &mut (InboundUpdates, StopToken)) -> &mut InboundUpdates {
        &mut state.0
    }

    let (stop_token, _stop_flag) = mk_stop_token();
    StatefulListener::new(
        (inbound, stop_token),
        stream,
        |state: &mut (InboundUpdates, StopToken)| state.1.clone(),
    )
}
