use roadside_protocol::{
    ServiceCategory, ToCompanion,
    ipc::CompanionTx,
    rpc::{BookServiceArgs, BridgeMethod},
};
use tracing::{info, warn};

use crate::{Error, Result};

/// Sends commands toward the companion layer.
#[derive(Clone)]
pub struct CompanionDispatcher {
    tx: CompanionTx,
}

impl CompanionDispatcher {
    /// Create a new dispatcher from a companion channel.
    pub fn new(tx: CompanionTx) -> Self {
        Self { tx }
    }

    /// Emit `bookService` for `category`.
    pub fn send_book_service(&self, category: ServiceCategory) -> Result<()> {
        info!(category = %category, method = BridgeMethod::BookService.as_str(), "outbound");
        self.tx
            .send(ToCompanion::BookService(BookServiceArgs {
                category_name: category.display_name().to_string(),
            }))
            .map_err(|_| Error::ChannelClosed)
    }

    /// Fire-and-forget booking: delivery failures are logged, never surfaced.
    pub fn book_service(&self, category: ServiceCategory) {
        if let Err(e) = self.send_book_service(category) {
            warn!(category = %category, error = %e, "bookService not delivered");
        }
    }
}
