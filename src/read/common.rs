//! Pagination helpers shared by multi-item reads.

/// drain a paginator into the items of every page
#[macro_export]
macro_rules! collect_paginated_items {
    ($paginator:expr) => {{
        let mut items = Vec::new();
        while let Some(page) = $paginator.next().await {
            if let Some(page_items) = page?.items {
                items.extend(page_items);
            }
        }
        Ok(items)
    }};
}
