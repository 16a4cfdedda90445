use super::prelude::*;

#[derive(Default)]
pub struct ActorQueries;

#[Object]
impl ActorQueries {
    /// Every known actor
    async fn actors(&self, ctx: &Context<'_>) -> Vec<Actor> {
        ctx.data_unchecked::<Arc<ActorDirectory>>()
            .all()
            .iter()
            .cloned()
            .map(actor_record_to_graphql)
            .collect()
    }
}
