//! Selection sets: which fields of a record a request wants back.

/// The fields requested from a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every stored field, plus relationship fields down to the configured
    /// default depth.
    #[default]
    Default,
    /// Exactly these fields, in this order.
    Fields(Vec<FieldSelection>),
}

/// One selected field, with its own selection if it is a relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: String,
    pub selection: Option<Selection>,
}

impl Selection {
    /// An empty explicit selection, to be filled with `field`/`nested`.
    pub fn fields() -> Self {
        Selection::Fields(Vec::new())
    }

    /// Explicit selection of scalar fields.
    pub fn of(names: &[&str]) -> Self {
        names.iter().fold(Self::fields(), |sel, name| sel.field(*name))
    }

    /// Add a scalar field.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.push(FieldSelection {
            name: name.into(),
            selection: None,
        })
    }

    /// Add a relationship field with its own selection.
    pub fn nested(self, name: impl Into<String>, selection: Selection) -> Self {
        self.push(FieldSelection {
            name: name.into(),
            selection: Some(selection),
        })
    }

    fn push(self, field: FieldSelection) -> Self {
        match self {
            Selection::Default => Selection::Fields(vec![field]),
            Selection::Fields(mut fields) => {
                fields.push(field);
                Selection::Fields(fields)
            }
        }
    }

    /// Returns true for the default selection.
    pub fn is_default(&self) -> bool {
        matches!(self, Selection::Default)
    }
}
