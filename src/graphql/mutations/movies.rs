use super::prelude::*;

#[derive(Default)]
pub struct MovieMutations;

#[Object]
impl MovieMutations {
    /// Add a movie and return the updated catalog.
    ///
    /// Requires an identity claim in the request context. Subscribers to
    /// `movieAdded` receive the new movie before the catalog is re-read, so
    /// the returned list may also contain movies added concurrently.
    async fn add_movie(
        &self,
        ctx: &Context<'_>,
        movie: Option<MovieInput>,
    ) -> Result<Vec<Movie>> {
        let user_id = ctx.require_user()?;
        let store = ctx.data_unchecked::<Arc<dyn MovieStore>>();
        let events = ctx.data_unchecked::<Arc<MovieEventBus>>();

        let movie = movie.ok_or_else(|| coded_error("Movie input is required", BAD_USER_INPUT))?;
        let input = movie_input_to_create(movie)?;
        let record = store.create(input).await.map_err(store_error)?;

        tracing::info!(
            user_id = %user_id,
            movie_id = %record.id,
            movie_title = %record.title,
            "User added movie: {}",
            record.title
        );

        let delivered = events.publish(MOVIE_ADDED, movie_record_to_graphql(record));
        tracing::debug!(subscribers = delivered, "Broadcast movieAdded");

        let records = store.find_all().await.map_err(store_error)?;
        Ok(records.into_iter().map(movie_record_to_graphql).collect())
    }
}
