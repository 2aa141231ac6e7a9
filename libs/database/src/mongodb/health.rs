use mongodb::{Client, bson::doc};

use crate::common::DatabaseResult;

/// Run `{ ping: 1 }` against the admin database
///
/// # Example
/// ```ignore
/// use database::mongodb::{connect_from_config, ping};
///
/// let client = connect_from_config(&config).await?;
/// let healthy = ping(&client).await.is_ok();
/// ```
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    client.database("admin").run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
