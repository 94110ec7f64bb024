use crate::domain::context::RequestContext;
use crate::domain::ports::TransferStoreBox;
use crate::domain::processor::{ProcessorClientBox, TransferRequest};
use crate::domain::transfer::Transfer;
use crate::error::{Error, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Initiates and cancels transfers against the processor. The local status
/// column only ever changes through webhook-driven updates; cancellation
/// here just asks the processor, and the webhook flips the record later.
pub struct TransferService {
    transfers: TransferStoreBox,
    processor: ProcessorClientBox,
}

impl TransferService {
    pub fn new(transfers: TransferStoreBox, processor: ProcessorClientBox) -> Self {
        Self {
            transfers,
            processor,
        }
    }

    pub async fn initiate(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        amount: Decimal,
        source: &str,
        destination: &str,
    ) -> Result<Transfer> {
        ctx.require_admin()?;
        if amount <= Decimal::ZERO {
            return Err(Error::validation("amount", "must be positive"));
        }

        let request = TransferRequest {
            source: source.to_string(),
            destination: destination.to_string(),
            amount,
            currency: "USD".to_string(),
        };
        let location = self.processor.create_transfer(&request).await?;

        let transfer = Transfer::new(ctx.tenant_id(), user_id, location, amount);
        self.transfers.store(transfer.clone()).await?;
        Ok(transfer)
    }

    pub async fn cancel(&self, ctx: &RequestContext, id: Uuid) -> Result<()> {
        ctx.require_admin()?;

        let transfer = self.get(ctx, id).await?;
        if transfer.status.is_terminal() {
            return Err(Error::NotAcceptable(format!(
                "transfer in status {} cannot be cancelled",
                transfer.status
            )));
        }

        self.processor.cancel_transfer(&transfer.external_id).await?;
        Ok(())
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Transfer> {
        ctx.require_admin_reader()?;
        self.transfers
            .get(ctx.tenant_id(), id)
            .await?
            .ok_or(Error::NotFound("transfer"))
    }
}
