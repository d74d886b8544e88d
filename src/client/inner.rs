//! Shared client state.

use crate::graphql::Dispatcher;
use crate::jobs::Documents;

/// State shared by every clone of a [`Client`](crate::Client).
pub(crate) struct ClientInner {
    pub(crate) dispatcher: Dispatcher,
    pub(crate) documents: Documents,
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
