use super::prelude::*;

#[derive(Default)]
pub struct MovieQueries;

#[Object]
impl MovieQueries {
    /// Every movie in the catalog
    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        let store = ctx.data_unchecked::<Arc<dyn MovieStore>>();

        let records = store.find_all().await.map_err(store_error)?;

        Ok(records.into_iter().map(movie_record_to_graphql).collect())
    }

    /// A single movie by id, or null when there is none
    async fn movie(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Movie>> {
        let store = ctx.data_unchecked::<Arc<dyn MovieStore>>();

        let record = store.find_by_id(&id).await.map_err(store_error)?;

        Ok(record.map(movie_record_to_graphql))
    }
}
