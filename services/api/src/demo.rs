use crate::infra::{
    seed_demo_data, InMemoryContentStore, InMemoryProfileSource, InMemoryTargetingGroupStore,
};
use adselect::ads::selection::AdvertisementSelector;
use adselect::ads::targeting::predicate::codec::PredicateFactory;
use adselect::ads::targeting::{EvaluatorPool, TargetingEvaluator};
use adselect::config::EvaluatorConfig;
use adselect::error::AppError;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Customer to select for; try "alice", "bob", or "" for an anonymous visitor
    #[arg(long, default_value = "alice")]
    pub(crate) customer_id: String,
    /// Marketplace to select from
    #[arg(long, default_value = "US")]
    pub(crate) marketplace_id: String,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let contents = Arc::new(InMemoryContentStore::default());
    let groups = Arc::new(InMemoryTargetingGroupStore::default());
    let profiles = Arc::new(InMemoryProfileSource::default());
    let factory = PredicateFactory::new(profiles.clone());
    seed_demo_data(&contents, &groups, &profiles, &factory);

    let pool = Arc::new(EvaluatorPool::from_config(&EvaluatorConfig::default()));
    let selector =
        AdvertisementSelector::new(contents, groups, TargetingEvaluator::new(pool));

    let ad = selector
        .select_advertisement(&args.customer_id, &args.marketplace_id)
        .await?;

    match ad.content() {
        Some(content) => {
            println!(
                "selected '{}' (generated id {}) for customer '{}' in marketplace '{}'",
                content.content_id,
                ad.id().unwrap_or("-"),
                args.customer_id,
                args.marketplace_id
            );
            println!("{}", content.render_content);
        }
        None => {
            println!(
                "no eligible advertisement for customer '{}' in marketplace '{}'",
                args.customer_id, args.marketplace_id
            );
        }
    }

    Ok(())
}
