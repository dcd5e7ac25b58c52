use crate::common;

use aws_sdk_dynamodb::{Client, error, operation};

/// Scan request.
///
/// Reads every item of the table. Only table maintenance uses it.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_orders::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let items = read::scan::Scan::default().send(client, "orders").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Whether to use a strongly consistent read.
    pub consistent_read: Option<bool>,
}

impl Scan {
    /// Execute the scan, following pagination until every page has been read.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_orders.scan", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
        table_name: &str,
    ) -> Result<Vec<common::Record>, error::SdkError<operation::scan::ScanError>> {
        let mut paginator = client
            .scan()
            .table_name(table_name)
            .set_consistent_read(self.consistent_read)
            .into_paginator()
            .send();
        crate::collect_paginated_items!(paginator)
    }
}
