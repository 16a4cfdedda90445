//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket.

use std::sync::Arc;

use async_graphql::{Context, Subscription};
use futures::Stream;

use crate::services::MOVIE_ADDED;

use super::MovieEventBus;
use super::types::Movie;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Movies as they are added. Runs until the client unsubscribes.
    async fn movie_added<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> impl Stream<Item = Movie> + 'ctx {
        ctx.data_unchecked::<Arc<MovieEventBus>>()
            .subscribe(MOVIE_ADDED)
    }
}
