use std::fmt;

/// Which entity table an insertion landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Top-level domain entity.
    Domain,
    /// City entity.
    City,
    /// Place (station) entity.
    Place,
}

/// One catalog insertion performed during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    /// Entity table the row went into.
    pub kind: EntityKind,
    /// Primary key of the inserted row, rendered as text.
    pub id: String,
    /// Name of the inserted entity, when the feed carried one.
    pub name: Option<String>,
}

/// What `reconcile` inserted: entity insertions only, in insertion order.
///
/// Edge insertions never appear here; they are insert-or-ignore and carry
/// no identity of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    entries: Vec<ChangeEntry>,
}

impl ChangeSummary {
    /// Record one insertion.
    pub fn push(&mut self, kind: EntityKind, id: impl Into<String>, name: Option<&str>) {
        self.entries.push(ChangeEntry {
            kind,
            id: id.into(),
            name: name.map(str::to_string),
        });
    }

    /// True if the reconciliation pass inserted nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserted entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The insertions in the order they happened.
    pub fn entries(&self) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter()
    }

    fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // helper: section header with underline
        let mut wrote_any = false;
        let mut section = |title: &str,
                           body: &mut dyn FnMut(&mut fmt::Formatter<'_>) -> fmt::Result|
         -> fmt::Result {
            if wrote_any {
                writeln!(f)?;
            }
            writeln!(f, "{title}")?;
            for _ in 0..title.len() {
                write!(f, "-")?;
            }
            writeln!(f)?;
            body(f)?;
            wrote_any = true;
            Ok(())
        };

        for (kind, title) in [
            (EntityKind::Domain, "Domains (NEW)"),
            (EntityKind::City, "Cities (NEW)"),
            (EntityKind::Place, "Places (NEW)"),
        ] {
            if self.of_kind(kind).next().is_some() {
                section(title, &mut |f| {
                    for entry in self.of_kind(kind) {
                        match &entry.name {
                            Some(name) => writeln!(f, "+ {}  \"{name}\"", entry.id)?,
                            None => writeln!(f, "+ {}", entry.id)?,
                        }
                    }
                    Ok(())
                })?;
            }
        }

        if !wrote_any {
            write!(f, "No changes")
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_changes() {
        assert_eq!(ChangeSummary::default().to_string(), "No changes");
    }

    #[test]
    fn display_sections_expected() {
        let mut s = ChangeSummary::default();
        s.push(EntityKind::Domain, "de", Some("nextbike Germany"));
        s.push(EntityKind::City, "14", Some("Leipzig"));
        s.push(EntityKind::Place, "5", Some("Augustusplatz"));
        s.push(EntityKind::Place, "7", None);

        let expected = "\
Domains (NEW)
-------------
+ de  \"nextbike Germany\"

Cities (NEW)
------------
+ 14  \"Leipzig\"

Places (NEW)
------------
+ 5  \"Augustusplatz\"
+ 7
";
        assert_eq!(s.to_string(), expected, "pretty summary did not match");
        assert_eq!(s.len(), 4);
        assert!(!s.is_empty());
    }
}
