use super::{StorageBackend, EMPLOYEES_KEY};
use crate::error::{Result, RosterError};
use crate::model::{seed_employees, Employee, EmployeeInput};
use crate::validation;
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle returned by [`EmployeeStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&[Employee])>;

/// The authoritative in-memory employee collection, mirrored to a storage
/// backend.
///
/// Constructed once at application start and handed to consumers by
/// reference; there is no global instance. All operations are synchronous
/// and the store is the sole writer, so ordering follows call order.
///
/// Mutations validate first and touch nothing on failure. Successful
/// mutations persist the full collection and then notify subscribers in
/// subscription order. Storage failures never fail an operation: they are
/// logged and the in-memory state stays authoritative for the session.
pub struct EmployeeStore<B: StorageBackend> {
    backend: B,
    employees: Vec<Employee>,
    selected: Option<Uuid>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<B: StorageBackend> EmployeeStore<B> {
    /// Load the collection from storage, seeding sample data when the
    /// collection key is absent or unreadable.
    pub fn new(backend: B) -> Self {
        let mut store = Self {
            backend,
            employees: Vec::new(),
            selected: None,
            listeners: Vec::new(),
            next_listener: 0,
        };
        store.load();
        store
    }

    fn load(&mut self) {
        match self.backend.get(EMPLOYEES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(employees) => {
                    self.employees = employees;
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "stored employee collection is unreadable, reseeding");
                }
            },
            Ok(None) => debug!("no stored employee collection, seeding sample data"),
            Err(err) => {
                warn!(error = %err, "failed to read employee collection, reseeding");
            }
        }
        self.employees = seed_employees();
        self.persist();
    }

    fn persist(&self) {
        match serde_json::to_string(&self.employees) {
            Ok(json) => {
                if let Err(err) = self.backend.set(EMPLOYEES_KEY, &json) {
                    warn!(error = %err, "failed to persist employee collection");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize employee collection"),
        }
    }

    fn notify(&mut self) {
        let employees = self.employees.as_slice();
        for (_, listener) in self.listeners.iter_mut() {
            listener(employees);
        }
    }

    /// All employees, in insertion order.
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Employee> {
        self.employees.iter().find(|emp| emp.id == id)
    }

    /// Validate and append a new record.
    ///
    /// On success the stored record (fresh id, both timestamps set) is
    /// returned. On validation failure nothing is mutated and the
    /// per-field error map comes back in [`RosterError::Invalid`].
    pub fn add(&mut self, input: &EmployeeInput) -> Result<Employee> {
        let fields = validation::validate(input, &self.employees, None)
            .map_err(RosterError::Invalid)?;
        let employee = Employee::new(fields);
        self.employees.push(employee.clone());
        self.persist();
        self.notify();
        Ok(employee)
    }

    /// Validate and replace the mutable fields of an existing record.
    ///
    /// Uniqueness checks exclude the record itself, so an update that
    /// keeps the employee's own email and phone succeeds.
    pub fn update(&mut self, id: Uuid, input: &EmployeeInput) -> Result<Employee> {
        let index = self
            .employees
            .iter()
            .position(|emp| emp.id == id)
            .ok_or(RosterError::NotFound(id))?;
        let fields = validation::validate(input, &self.employees, Some(id))
            .map_err(RosterError::Invalid)?;
        self.employees[index].apply(fields);
        let updated = self.employees[index].clone();
        self.persist();
        self.notify();
        Ok(updated)
    }

    /// Remove the record with the given id, clearing the selection if it
    /// pointed at it.
    pub fn remove(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .employees
            .iter()
            .position(|emp| emp.id == id)
            .ok_or(RosterError::NotFound(id))?;
        self.employees.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.persist();
        self.notify();
        Ok(())
    }

    /// Case-insensitive substring search over first name, last name and
    /// email. An empty or whitespace query returns the full collection;
    /// input order is preserved either way.
    pub fn search(&self, query: &str) -> Vec<&Employee> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return self.employees.iter().collect();
        }
        self.employees
            .iter()
            .filter(|emp| {
                emp.first_name.to_lowercase().contains(&term)
                    || emp.last_name.to_lowercase().contains(&term)
                    || emp.email.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Whether an email is already taken (case-insensitive), optionally
    /// excluding one record.
    pub fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> bool {
        validation::email_taken(email, &self.employees, exclude)
    }

    /// Whether a phone number is already taken by normalized digits,
    /// optionally excluding one record.
    pub fn phone_exists(&self, phone: &str, exclude: Option<Uuid>) -> bool {
        validation::phone_taken(phone, &self.employees, exclude)
    }

    /// Mark a record as selected. Unknown ids clear the selection.
    pub fn select(&mut self, id: Uuid) {
        self.selected = self.get(id).map(|emp| emp.id);
    }

    pub fn selected(&self) -> Option<&Employee> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Empty the collection (maintenance/testing helper).
    pub fn clear(&mut self) {
        self.employees.clear();
        self.selected = None;
        self.persist();
        self.notify();
    }

    /// Register a listener invoked synchronously after every successful
    /// mutation, in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Employee]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemBackend;
    use crate::validation::{Field, ValidationError};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn input(first: &str, last: &str, email: &str, phone: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            phone: phone.into(),
            date_of_birth: "1990-01-15".into(),
            date_of_employment: "2022-09-23".into(),
            department: "Tech".into(),
            position: "Senior".into(),
        }
    }

    fn empty_store() -> EmployeeStore<MemBackend> {
        let mut store = EmployeeStore::new(MemBackend::new());
        store.clear();
        store
    }

    fn invalid_errors(result: Result<Employee>) -> crate::validation::ValidationErrors {
        match result {
            Err(RosterError::Invalid(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other.map(|e| e.id)),
        }
    }

    // --- Seeding & Persistence ---

    #[test]
    fn fresh_backend_seeds_sample_data_and_persists_it() {
        let backend = MemBackend::new();
        let store = EmployeeStore::new(&backend);
        assert_eq!(store.len(), 5);
        assert!(backend.contains(EMPLOYEES_KEY));
    }

    #[test]
    fn unreadable_payload_falls_back_to_seed_data() {
        let backend = MemBackend::new();
        backend.set(EMPLOYEES_KEY, "not json at all").unwrap();
        let store = EmployeeStore::new(&backend);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn read_error_falls_back_to_seed_data() {
        let backend = MemBackend::new();
        backend.set_simulate_read_error(true);
        let store = EmployeeStore::new(&backend);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn collection_round_trips_through_the_backend() {
        let backend = MemBackend::new();
        let added = {
            let mut store = EmployeeStore::new(&backend);
            store.clear();
            store
                .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
                .unwrap()
        };

        let reloaded = EmployeeStore::new(&backend);
        assert_eq!(reloaded.all(), &[added]);
    }

    #[test]
    fn write_failure_does_not_fail_the_mutation() {
        let backend = MemBackend::new();
        let mut store = EmployeeStore::new(&backend);
        store.clear();

        backend.set_simulate_write_error(true);
        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        assert_eq!(store.get(added.id), Some(&added));
    }

    // --- Add ---

    #[test]
    fn add_assigns_id_and_timestamps() {
        let mut store = empty_store();
        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        assert!(!added.id.is_nil());
        assert_eq!(added.created_at, added.updated_at);
        assert_eq!(store.get(added.id), Some(&added));
    }

    #[test]
    fn add_rejects_duplicate_email_case_insensitively() {
        let mut store = empty_store();
        store
            .add(&input("Jane", "Doe", "a@x.com", "555-000-123-4"))
            .unwrap();

        let errors = invalid_errors(store.add(&input("John", "Roe", "A@X.COM", "555-000-567-8")));
        assert_eq!(errors.get(Field::Email), Some(ValidationError::AlreadyExists));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_rejects_duplicate_phone_by_normalized_digits() {
        let mut store = empty_store();
        store
            .add(&input("Jane", "Doe", "a@x.com", "555-000-123-4"))
            .unwrap();

        let errors =
            invalid_errors(store.add(&input("John", "Roe", "b@x.com", "(555) 000 1234")));
        assert_eq!(errors.get(Field::Phone), Some(ValidationError::AlreadyExists));
        assert_eq!(store.len(), 1);
    }

    // --- Update ---

    #[test]
    fn update_keeping_own_email_and_phone_succeeds() {
        let mut store = empty_store();
        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();

        let mut changed = input("Jane", "Doe", "jane@x.com", "555-000-123-4");
        changed.position = "Medior".into();
        let updated = store.update(added.id, &changed).unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(updated.position.as_str(), "Medior");
        assert!(updated.updated_at >= added.updated_at);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = empty_store();
        let missing = Uuid::new_v4();
        match store.update(missing, &input("Jane", "Doe", "jane@x.com", "555-000-123-4")) {
            Err(RosterError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {:?}", other.map(|e| e.id)),
        }
    }

    #[test]
    fn failed_update_leaves_the_record_untouched() {
        let mut store = empty_store();
        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();

        let mut bad = input("Jane", "Doe", "jane@x.com", "555-000-123-4");
        bad.email = "broken".into();
        let errors = invalid_errors(store.update(added.id, &bad));
        assert_eq!(errors.get(Field::Email), Some(ValidationError::InvalidFormat));
        assert_eq!(store.get(added.id), Some(&added));
    }

    // --- Remove & Selection ---

    #[test]
    fn remove_unknown_id_leaves_collection_unchanged() {
        let mut store = empty_store();
        store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        assert!(matches!(
            store.remove(Uuid::new_v4()),
            Err(RosterError::NotFound(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_clears_a_matching_selection() {
        let mut store = empty_store();
        let a = store
            .add(&input("Jane", "Doe", "a@x.com", "555-000-123-4"))
            .unwrap();
        let b = store
            .add(&input("John", "Roe", "b@x.com", "555-000-567-8"))
            .unwrap();

        store.select(a.id);
        assert_eq!(store.selected().map(|e| e.id), Some(a.id));

        store.remove(a.id).unwrap();
        assert_eq!(store.selected(), None);
        assert_eq!(store.len(), 1);

        // Removing someone else leaves an unrelated selection alone.
        store.select(b.id);
        let c = store
            .add(&input("Jill", "Moe", "c@x.com", "555-000-999-0"))
            .unwrap();
        store.remove(c.id).unwrap();
        assert_eq!(store.selected().map(|e| e.id), Some(b.id));
    }

    // --- Search ---

    #[test]
    fn empty_query_returns_everything_in_order() {
        let backend = MemBackend::new();
        let store = EmployeeStore::new(&backend);
        let all = store.search("   ");
        assert_eq!(all.len(), 5);
        let names: Vec<_> = all.iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, ["Ahmet", "Mehmet", "Ayşe", "Can", "Zeynep"]);
    }

    #[test]
    fn search_is_case_insensitive_over_names_and_email() {
        let backend = MemBackend::new();
        let store = EmployeeStore::new(&backend);

        let by_first = store.search("AHM");
        assert_eq!(by_first.len(), 1);
        assert_eq!(by_first[0].first_name, "Ahmet");

        let by_last = store.search("kaya");
        assert_eq!(by_last.len(), 1);
        assert_eq!(by_last[0].last_name, "Kaya");

        let by_email = store.search("company.com");
        assert_eq!(by_email.len(), 4);

        assert!(store.search("nobody-here").is_empty());
    }

    // --- Uniqueness Probes ---

    #[test]
    fn existence_checks_honor_exclusion() {
        let mut store = empty_store();
        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();

        assert!(store.email_exists("JANE@X.COM", None));
        assert!(!store.email_exists("JANE@X.COM", Some(added.id)));
        assert!(store.phone_exists("(555) 000 1234", None));
        assert!(!store.phone_exists("(555) 000 1234", Some(added.id)));
        assert!(!store.phone_exists("555-111-222-3", None));
    }

    // --- Subscriptions ---

    #[test]
    fn listeners_fire_after_each_successful_mutation() {
        let mut store = empty_store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |employees| sink.borrow_mut().push(employees.len()));

        let added = store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        store
            .update(added.id, &input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        store.remove(added.id).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 1, 0]);
    }

    #[test]
    fn failed_mutations_do_not_notify() {
        let mut store = empty_store();
        let calls = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&calls);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        let mut bad = input("Jane", "Doe", "jane@x.com", "555-000-123-4");
        bad.email = "broken".into();
        assert!(store.add(&bad).is_err());
        assert!(store.remove(Uuid::new_v4()).is_err());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn listeners_run_in_subscription_order_until_unsubscribed() {
        let mut store = empty_store();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first_sink = Rc::clone(&order);
        let first = store.subscribe(move |_| first_sink.borrow_mut().push("first"));
        let second_sink = Rc::clone(&order);
        store.subscribe(move |_| second_sink.borrow_mut().push("second"));

        store
            .add(&input("Jane", "Doe", "jane@x.com", "555-000-123-4"))
            .unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);

        store.unsubscribe(first);
        store
            .add(&input("John", "Roe", "john@x.com", "555-000-567-8"))
            .unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second", "second"]);
    }
}
