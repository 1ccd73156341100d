/// Detail view of a single tutorial, with a few related tutorials from the
/// same category.
use crate::catalog::Catalog;
use crate::model::TutorialRecord;
use crate::route::Route;

/// Maximum number of related tutorials shown under a detail view.
pub const MAX_RELATED: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<'a> {
    Found {
        record: &'a TutorialRecord,
        related: Vec<&'a TutorialRecord>,
    },
    /// Unknown id; `back_to` leads to the tutorial list.
    NotFound { id: String, back_to: Route },
}

impl<'a> DetailView<'a> {
    pub fn resolve(catalog: &'a Catalog, id: &str) -> Self {
        match catalog.get(id) {
            Some(record) => Self::Found {
                record,
                related: related(catalog, record),
            },
            None => Self::NotFound {
                id: id.to_string(),
                back_to: Route::Learn,
            },
        }
    }

    pub fn back_to(&self) -> Route {
        match self {
            Self::Found { .. } => Route::Learn,
            Self::NotFound { back_to, .. } => back_to.clone(),
        }
    }
}

/// Same-category records other than `record`, in catalog order.
pub fn related<'a>(catalog: &'a Catalog, record: &TutorialRecord) -> Vec<&'a TutorialRecord> {
    catalog
        .records()
        .iter()
        .filter(|r| r.category == record.category && r.id != record.id)
        .take(MAX_RELATED)
        .collect()
}
