//! Dynamic features that trigger a bailout decision.

use crate::core::types::BailoutOptions;

const DYNAMIC_RENDERING_LINK: &str = "https://nextjs.org/docs/app/building-your-application/rendering/server-components#dynamic-rendering";
const NO_STORE_LINK: &str = "https://nextjs.org/docs/app/api-reference/functions/unstable_noStore";

/// A request-dependent capability used by render code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicFeature {
    /// Reading incoming request headers.
    Headers,
    /// Reading incoming request cookies.
    Cookies,
    /// Reading one property of the page's search params.
    SearchParam(String),
    /// Opting the current scope out of caching.
    NoStore,
    /// A fetch issued with `revalidate: 0` or `cache: "no-store"`.
    UncachedFetch { url: String },
}

impl DynamicFeature {
    /// Reason string passed to the bailout decision.
    pub fn reason(&self) -> String {
        match self {
            DynamicFeature::Headers => "headers".to_string(),
            DynamicFeature::Cookies => "cookies".to_string(),
            DynamicFeature::SearchParam(prop) => format!("searchParams.{}", prop),
            DynamicFeature::NoStore => "unstable_noStore()".to_string(),
            DynamicFeature::UncachedFetch { url } => format!("revalidate: 0 fetch {}", url),
        }
    }

    /// Options carrying the documentation link for this feature.
    pub fn options(&self) -> BailoutOptions {
        match self {
            DynamicFeature::Headers | DynamicFeature::Cookies | DynamicFeature::SearchParam(_) => {
                BailoutOptions::default().with_link(DYNAMIC_RENDERING_LINK)
            }
            DynamicFeature::NoStore => BailoutOptions::default().with_link(NO_STORE_LINK),
            DynamicFeature::UncachedFetch { .. } => BailoutOptions::default(),
        }
    }
}
