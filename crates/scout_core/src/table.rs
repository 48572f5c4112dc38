use crate::contact::{Contact, ContactDraft, ContactField, ContactId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: ContactField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: ContactField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    pub fn new(field: ContactField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Clicking the active column flips direction; any other column becomes
    /// active in ascending order.
    pub fn toggle(&mut self, field: ContactField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Visibility of the optional columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldToggles {
    pub name: bool,
    pub email: bool,
    pub company: bool,
    pub role: bool,
}

impl Default for FieldToggles {
    fn default() -> Self {
        Self {
            name: true,
            email: true,
            company: true,
            role: true,
        }
    }
}

impl FieldToggles {
    pub fn is_visible(&self, field: ContactField) -> bool {
        match field {
            ContactField::Name => self.name,
            ContactField::Email => self.email,
            ContactField::Company => self.company,
            ContactField::Role => self.role,
            ContactField::SourceUrl | ContactField::Status => true,
        }
    }

    /// Flips one optional column. Returns `false` for columns that are
    /// always visible.
    pub fn toggle(&mut self, field: ContactField) -> bool {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Role => &mut self.role,
            ContactField::SourceUrl | ContactField::Status => return false,
        };
        *slot = !*slot;
        true
    }

    /// Visible columns in fixed table order.
    pub fn visible_columns(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| self.is_visible(*field))
            .collect()
    }
}

/// The session's contact collection. Append-only apart from explicit edits
/// and removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactTable {
    contacts: Vec<Contact>,
    next_id: u64,
}

impl Default for ContactTable {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }
}

impl ContactTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decoded batch, assigning fresh identifiers, and returns the
    /// newly created rows.
    pub fn ingest(&mut self, drafts: Vec<ContactDraft>) -> &[Contact] {
        let start = self.contacts.len();
        for draft in drafts {
            let id = ContactId(self.next_id);
            self.next_id += 1;
            self.contacts.push(Contact::from_draft(id, draft));
        }
        &self.contacts[start..]
    }

    /// Replaces one field verbatim. Returns `false` when the id is unknown.
    pub fn edit(&mut self, id: ContactId, field: ContactField, value: impl Into<String>) -> bool {
        match self.contacts.iter_mut().find(|c| c.id == id) {
            Some(contact) => {
                *contact.field_mut(field) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ContactId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        self.contacts.len() != before
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// Filters and sorts `contacts` for display.
///
/// A row passes the filter when any searchable field contains the query,
/// case-insensitively; a blank query keeps every row. Sorting compares the
/// lowercased sort field and is stable in both directions, so rows with
/// equal keys keep their collection order.
pub fn view<'a>(contacts: &'a [Contact], query: &str, sort: SortState) -> Vec<&'a Contact> {
    let needle = if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    };

    let mut keyed: Vec<(String, &Contact)> = contacts
        .iter()
        .filter(|contact| match &needle {
            Some(needle) => matches_query(contact, needle),
            None => true,
        })
        .map(|contact| (contact.field(sort.field).to_lowercase(), contact))
        .collect();

    // `sort_by` is stable; reversing the comparator keeps ties in input order.
    keyed.sort_by(|(a, _), (b, _)| match sort.direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    });

    keyed.into_iter().map(|(_, contact)| contact).collect()
}

fn matches_query(contact: &Contact, needle: &str) -> bool {
    ContactField::ALL
        .into_iter()
        .filter(|field| field.is_searchable())
        .any(|field| contact.field(field).to_lowercase().contains(needle))
}

/// Projects rows onto the visible columns: a header of labels plus one
/// string row per contact, in the given order.
pub fn project_rows(rows: &[Contact], columns: &[ContactField]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = columns.iter().map(|c| c.label().to_string()).collect();
    let body = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.field(*c).to_string())
                .collect()
        })
        .collect();
    (header, body)
}
