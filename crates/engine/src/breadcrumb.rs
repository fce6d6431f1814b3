//! Breadcrumb rendering of the selection path.
//!
//! The trail is `main`, then `" / " sub` when a subsection is selected, then
//! the tertiary title appended as its own segment so renderers can style it
//! apart from the rest.

use tiernav_types::SelectionPath;

use crate::store::SelectionStore;

pub const SEPARATOR: &str = " / ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrumbKind {
    Main,
    Separator,
    Sub,
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crumb<'a> {
    pub kind: CrumbKind,
    pub text: &'a str,
}

/// Splits the path into styled segments. Empty tiers produce no segment.
pub fn crumbs(path: &SelectionPath) -> Vec<Crumb<'_>> {
    let mut out = Vec::with_capacity(4);
    if !path.main.is_empty() {
        out.push(Crumb {
            kind: CrumbKind::Main,
            text: &path.main,
        });
    }
    if !path.sub.is_empty() {
        out.push(Crumb {
            kind: CrumbKind::Separator,
            text: SEPARATOR,
        });
        out.push(Crumb {
            kind: CrumbKind::Sub,
            text: &path.sub,
        });
    }
    if !path.tertiary.is_empty() {
        out.push(Crumb {
            kind: CrumbKind::Tertiary,
            text: &path.tertiary,
        });
    }
    out
}

/// Flat breadcrumb string.
pub fn breadcrumb(path: &SelectionPath) -> String {
    crumbs(path).into_iter().map(|crumb| crumb.text).collect()
}

/// Decides whether the breadcrumb is shown for the current service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreadcrumbGate {
    service: Option<String>,
}

impl BreadcrumbGate {
    /// Shows the breadcrumb only while the store's service title equals
    /// `service`. `None` always shows it.
    pub fn new(service: Option<String>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn allows(&self, store: &SelectionStore) -> bool {
        self.service.as_deref().is_none_or(|service| store.service_title() == service)
    }

    /// The breadcrumb for `store`, or `None` when the gate hides it.
    pub fn render(&self, store: &SelectionStore) -> Option<String> {
        self.allows(store).then(|| breadcrumb(store.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_main_and_sub() {
        assert_eq!(breadcrumb(&SelectionPath::new("생산관리", "일일리포트", "")), "생산관리 / 일일리포트");
        assert_eq!(breadcrumb(&SelectionPath::new("생산관리", "", "")), "생산관리");
        assert_eq!(breadcrumb(&SelectionPath::default()), "");
    }

    #[test]
    fn tertiary_is_a_separate_segment() {
        let path = SelectionPath::new("생산관리", "라인현황", "2라인");
        let kinds: Vec<CrumbKind> = crumbs(&path).iter().map(|crumb| crumb.kind).collect();
        assert_eq!(
            kinds,
            vec![CrumbKind::Main, CrumbKind::Separator, CrumbKind::Sub, CrumbKind::Tertiary]
        );
        assert_eq!(breadcrumb(&path), "생산관리 / 라인현황2라인");
    }

    #[test]
    fn gate_compares_service_title() {
        let mut store = SelectionStore::default();
        store.set_main("생산관리");
        let gate = BreadcrumbGate::new(Some("SCTT".into()));
        assert_eq!(gate.render(&store), None);

        store.set_service_title("SCTT");
        assert_eq!(gate.render(&store).as_deref(), Some("생산관리"));

        assert!(BreadcrumbGate::default().allows(&SelectionStore::default()));
    }
}
