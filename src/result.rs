use crate::georss::Geometry;
use crate::temporal::Temporal;

/// One page of search results, as returned by a single request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResultPage {
    pub title: String,
    pub id: String,
    /// Where the description of the searched endpoint can be found.
    pub source: String,
    pub total_results: u64,
    pub start_index: u64,
    pub items_per_page: u64,
    pub items: Vec<SearchResultItem>,

    pub creator: Option<String>,
    pub subjects: Vec<String>,
    pub r#abstract: Option<String>,
    pub publisher: Option<String>,
    pub contributors: Vec<String>,
    pub modified: Option<Temporal>,
    pub identifier: Option<String>,
    pub language: Option<String>,
    pub rights: Option<String>,
    pub envelopes: Vec<Geometry>,

    pub next_page: Option<String>,
    pub previous_page: Option<String>,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
}

/// A single hit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResultItem {
    pub title: String,
    pub id: String,
    pub identifier: String,
    pub creator: Option<String>,
    pub subjects: Vec<String>,
    pub r#abstract: Option<String>,
    pub contributors: Vec<String>,
    pub modified: Option<Temporal>,
    pub date: Option<Temporal>,
    pub sources: Vec<String>,
    pub language: Option<String>,
    pub rights: Option<String>,
    pub envelope: Option<Geometry>,
}

/// A complete search result, spread over any number of pages.
///
/// Pages are pulled from the underlying iterator only as they are consumed,
/// and only once: iterate a fresh `SearchResult` to see them again.
#[derive(Debug)]
pub struct SearchResult<P>
where
    P: Iterator<Item = SearchResultPage>,
{
    pub total_results: u64,
    pub start_index: u64,
    pub items_per_page: u64,
    pages: P,
}

impl<P> SearchResult<P>
where
    P: Iterator<Item = SearchResultPage>,
{
    pub fn new(total_results: u64, start_index: u64, items_per_page: u64, pages: P) -> Self {
        SearchResult {
            total_results,
            start_index,
            items_per_page,
            pages,
        }
    }

    /// Build a result from its first page, taking the totals from it. The
    /// first page is yielded before `rest`.
    pub fn from_first_page(
        first: SearchResultPage,
        rest: P,
    ) -> SearchResult<std::iter::Chain<std::iter::Once<SearchResultPage>, P>> {
        SearchResult {
            total_results: first.total_results,
            start_index: first.start_index,
            items_per_page: first.items_per_page,
            pages: std::iter::once(first).chain(rest),
        }
    }

    /// The pages, in order.
    pub fn pages(self) -> P {
        self.pages
    }

    /// The items of all pages, in page order.
    pub fn items(self) -> impl Iterator<Item = SearchResultItem> {
        self.pages.flat_map(|page| page.items.into_iter())
    }
}
