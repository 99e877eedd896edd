use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{
    AdvertisementContent, ClickThroughRate, GeneratedAdvertisement, RequestContext,
};
use super::store::{ContentStore, StoreError, TargetingGroupStore};
use super::targeting::TargetingEvaluator;

/// Picks the advertisement to render for one customer/marketplace pair.
pub struct AdvertisementSelector<C, T> {
    content_store: Arc<C>,
    targeting_store: Arc<T>,
    evaluator: TargetingEvaluator,
}

/// Store failures surfaced by selection. "No eligible ad" is not an error;
/// it comes back as [`GeneratedAdvertisement::Empty`].
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("content lookup failed: {0}")]
    ContentLookup(#[source] StoreError),
    #[error("targeting group lookup failed: {0}")]
    TargetingLookup(#[source] StoreError),
}

impl<C, T> AdvertisementSelector<C, T>
where
    C: ContentStore,
    T: TargetingGroupStore,
{
    pub fn new(
        content_store: Arc<C>,
        targeting_store: Arc<T>,
        evaluator: TargetingEvaluator,
    ) -> Self {
        Self {
            content_store,
            targeting_store,
            evaluator,
        }
    }

    /// Returns the eligible advertisement with the highest click-through
    /// rate, or the empty advertisement when the marketplace id is blank,
    /// the marketplace has no candidates, or the customer matches no
    /// targeting group. A whitespace-only marketplace id counts as blank
    /// and is never sent to the content store. Store failures are returned
    /// to the caller, never downgraded to an empty ad.
    pub async fn select_advertisement(
        &self,
        customer_id: &str,
        marketplace_id: &str,
    ) -> Result<GeneratedAdvertisement, SelectionError> {
        if marketplace_id.trim().is_empty() {
            warn!("marketplace id is empty, returning empty advertisement");
            return Ok(GeneratedAdvertisement::empty());
        }

        let contents = self
            .content_store
            .get(marketplace_id)
            .map_err(SelectionError::ContentLookup)?;
        if contents.is_empty() {
            info!(%marketplace_id, "no advertisements registered for marketplace");
            return Ok(GeneratedAdvertisement::empty());
        }

        let context = Arc::new(RequestContext::new(customer_id, marketplace_id));

        // Only a strictly greater CTR displaces the current winner, so ties
        // keep the earliest candidate in store order.
        let mut winner: Option<(AdvertisementContent, ClickThroughRate)> = None;
        for content in contents {
            let Some(ctr) = self.best_eligible_ctr(&content, &context).await? else {
                continue;
            };
            debug!(content_id = %content.content_id, ctr = ctr.value(), "content eligible");

            match &winner {
                Some((_, best)) if *best >= ctr => {}
                _ => winner = Some((content, ctr)),
            }
        }

        match winner {
            Some((content, ctr)) => {
                info!(
                    content_id = %content.content_id,
                    ctr = ctr.value(),
                    %marketplace_id,
                    "selected advertisement"
                );
                Ok(GeneratedAdvertisement::render(content))
            }
            None => {
                info!(%marketplace_id, "customer eligible for no advertisement");
                Ok(GeneratedAdvertisement::empty())
            }
        }
    }

    /// Highest CTR among the content's groups that match the context, or
    /// `None` when no group matches. Ineligible content is excluded outright
    /// rather than mapped to a sentinel rate.
    async fn best_eligible_ctr(
        &self,
        content: &AdvertisementContent,
        context: &Arc<RequestContext>,
    ) -> Result<Option<ClickThroughRate>, SelectionError> {
        let groups = self
            .targeting_store
            .get(&content.content_id)
            .map_err(SelectionError::TargetingLookup)?;

        let mut best: Option<ClickThroughRate> = None;
        for group in &groups {
            if self.evaluator.evaluate(group, context).await.is_true()
                && best.map_or(true, |current| group.click_through_rate > current)
            {
                best = Some(group.click_through_rate);
            }
        }
        Ok(best)
    }
}
