use crate::dynamics::{
    BodySet, BroadPhase, ColliderHandle, ColliderSet, Contact, ContactFilter, ContactHandle,
    ContactListener, ContactSettings,
};
use crate::utils::BlockAllocator;
use std::fmt;

enum ContactUpdate {
    Destroy,
    Skip,
    Update,
}

/// Creates, updates, and destroys the contacts between colliders.
///
/// Each step is made of three phases which must run in this order:
/// 1. [`ContactManager::synchronize_shapes`] refreshes the bounds cached by the contacts.
/// 2. [`ContactManager::find_new_contacts`] creates the contacts for the new pairs reported by
///    the broad-phase.
/// 3. [`ContactManager::update_contacts`] destroys the contacts that became invalid and runs
///    the narrow-phase on the others.
pub struct ContactManager {
    broad_phase: BroadPhase,
    contacts: BlockAllocator<Contact>,
    contact_list: Vec<ContactHandle>,
    settings: ContactSettings,
    filter: Option<Box<dyn ContactFilter>>,
    listener: Option<Box<dyn ContactListener>>,
}

impl Default for ContactManager {
    fn default() -> Self {
        Self::new(ContactSettings::default())
    }
}

impl fmt::Debug for ContactManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactManager")
            .field("broad_phase", &self.broad_phase)
            .field("contact_list", &self.contact_list)
            .field("settings", &self.settings)
            .field("has_filter", &self.filter.is_some())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl ContactManager {
    /// Creates a contact manager without any contact.
    pub fn new(settings: ContactSettings) -> Self {
        Self {
            broad_phase: BroadPhase::new(&settings),
            contacts: BlockAllocator::new(),
            contact_list: Vec::new(),
            settings,
            filter: None,
            listener: None,
        }
    }

    /// The contact detection parameters.
    pub fn settings(&self) -> &ContactSettings {
        &self.settings
    }

    /// The broad-phase.
    pub fn broad_phase(&self) -> &BroadPhase {
        &self.broad_phase
    }

    /// The allocator the contacts are stored in.
    pub fn allocator(&self) -> &BlockAllocator<Contact> {
        &self.contacts
    }

    /// Sets the filter deciding which colliders can collide.
    pub fn set_contact_filter(&mut self, filter: Option<Box<dyn ContactFilter>>) {
        self.filter = filter;
    }

    /// Sets the listener receiving the contact events.
    pub fn set_contact_listener(&mut self, listener: Option<Box<dyn ContactListener>>) {
        self.listener = listener;
    }

    /// Removes the contact listener and returns it.
    pub fn take_contact_listener(&mut self) -> Option<Box<dyn ContactListener>> {
        self.listener.take()
    }

    /// The number of live contacts.
    pub fn contact_count(&self) -> usize {
        self.contact_list.len()
    }

    /// The contact identified by `handle`.
    pub fn contact(&self, handle: ContactHandle) -> Option<&Contact> {
        self.contacts.get(handle.0)
    }

    /// The contact identified by `handle`.
    pub fn contact_mut(&mut self, handle: ContactHandle) -> Option<&mut Contact> {
        self.contacts.get_mut(handle.0)
    }

    /// Iterates through all the live contacts.
    pub fn contacts(&self) -> impl Iterator<Item = (ContactHandle, &Contact)> {
        self.contact_list
            .iter()
            .map(move |handle| (*handle, &self.contacts[handle.0]))
    }

    /// The contact between the colliders `a` and `b`, if any.
    pub fn contact_pair(
        &self,
        a: ColliderHandle,
        b: ColliderHandle,
        colliders: &ColliderSet,
    ) -> Option<ContactHandle> {
        colliders
            .get(a)?
            .contact_edges()
            .iter()
            .find(|edge| edge.other == b)
            .map(|edge| edge.contact)
    }

    /// The contacts the constraint solver must handle: touching, not involving any sensor,
    /// and involving at least one dynamic body.
    pub fn solver_contacts(&self, colliders: &ColliderSet, bodies: &BodySet) -> Vec<ContactHandle> {
        self.contacts()
            .filter(|(_, contact)| contact.is_overlapping() && !contact.is_sensor())
            .filter(|(_, contact)| {
                let body_a = colliders[contact.collider_a()].body();
                let body_b = colliders[contact.collider_b()].body();
                bodies[body_a].is_dynamic() || bodies[body_b].is_dynamic()
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Creates the broad-phase proxy of a collider.
    pub fn register_collider(
        &mut self,
        handle: ColliderHandle,
        colliders: &mut ColliderSet,
        bodies: &BodySet,
    ) {
        let collider = &mut colliders[handle];
        let aabb = collider
            .shape()
            .compute_aabb(bodies[collider.body()].position());
        collider.proxy = self.broad_phase.create_proxy(&aabb, handle);
    }

    /// Destroys all the contacts of a collider and its broad-phase proxy.
    pub fn unregister_collider(&mut self, handle: ColliderHandle, colliders: &mut ColliderSet) {
        self.destroy_contacts_of(handle, colliders);
        self.broad_phase.destroy_proxy(colliders[handle].proxy);
    }

    /// Updates the broad-phase proxy of a collider after its body moved.
    pub fn synchronize_collider(
        &mut self,
        handle: ColliderHandle,
        colliders: &ColliderSet,
        bodies: &BodySet,
    ) {
        let collider = &colliders[handle];
        let body = &bodies[collider.body()];
        let aabb = collider.shape().compute_aabb(body.position());
        let _ = self
            .broad_phase
            .move_proxy(collider.proxy(), &aabb, &body.displacement());
    }

    /// Forces the pairs involving a collider to be reported again by the broad-phase at the
    /// next step.
    pub fn touch_collider(&mut self, handle: ColliderHandle, colliders: &ColliderSet) {
        self.broad_phase.touch_proxy(colliders[handle].proxy());
    }

    /// Creates the contact between the colliders `a` and `b` if they may collide and aren't
    /// already in contact.
    pub fn add_pair(
        &mut self,
        a: ColliderHandle,
        b: ColliderHandle,
        colliders: &mut ColliderSet,
        bodies: &mut BodySet,
    ) -> Option<ContactHandle> {
        let co_a = colliders.get(a)?;
        let co_b = colliders.get(b)?;

        if co_a.body() == co_b.body() {
            return None;
        }

        let (shortest, other) = if co_a.contact_edges().len() <= co_b.contact_edges().len() {
            (co_a, b)
        } else {
            (co_b, a)
        };

        let exists = shortest
            .contact_edges()
            .iter()
            .any(|edge| edge.other == other && self.contacts[edge.contact.0].pair().is_pair(a, b));
        if exists {
            return None;
        }

        if !bodies.should_collide(co_a.body(), co_b.body()) {
            return None;
        }

        if let Some(filter) = &self.filter {
            if !filter.should_collide(co_a, co_b) {
                return None;
            }
        }

        let handle = Contact::create(a, b, colliders, bodies, &self.settings, &mut self.contacts)?;

        // The contact may have swapped the two colliders.
        let contact = &mut self.contacts[handle.0];
        let pair = *contact.pair();
        contact.list_index = self.contact_list.len();
        self.contact_list.push(handle);

        let (edge_a, edge_b) = pair.edges(handle);
        colliders[pair.collider_a].push_edge(edge_a);
        colliders[pair.collider_b].push_edge(edge_b);

        let co_a = &colliders[pair.collider_a];
        let co_b = &colliders[pair.collider_b];
        if !co_a.is_sensor() && !co_b.is_sensor() {
            let (body_a, body_b) = (co_a.body(), co_b.body());
            bodies[body_a].set_awake(true);
            bodies[body_b].set_awake(true);
        }

        Some(handle)
    }

    /// Refreshes the bounds cached by every contact.
    pub fn synchronize_shapes(&mut self, colliders: &ColliderSet, bodies: &BodySet) {
        for handle in &self.contact_list {
            self.contacts[handle.0].synchronize(colliders, bodies, &self.settings);
        }
    }

    /// Creates the contacts of the pairs newly reported by the broad-phase, and updates the
    /// triangles tracked by the mesh contacts.
    pub fn find_new_contacts(&mut self, colliders: &mut ColliderSet, bodies: &mut BodySet) {
        let mut pairs = Vec::new();
        self.broad_phase.find_pairs(|a, b| pairs.push((a, b)));

        for (a, b) in pairs {
            let _ = self.add_pair(a, b, colliders, bodies);
        }

        for handle in &self.contact_list {
            self.contacts[handle.0].find_new_pairs(colliders);
        }
    }

    /// Destroys the contacts that are no longer valid and runs the narrow-phase on the
    /// contacts involving at least one active body.
    pub fn update_contacts(&mut self, colliders: &mut ColliderSet, bodies: &BodySet) {
        let mut i = 0;

        while i < self.contact_list.len() {
            let handle = self.contact_list[i];
            let decision = self.check_contact(handle, colliders, bodies);

            match decision {
                // The last contact of the list is swapped into the slot `i`.
                ContactUpdate::Destroy => self.destroy(handle, colliders),
                ContactUpdate::Skip => i += 1,
                ContactUpdate::Update => {
                    let listener = self
                        .listener
                        .as_deref_mut()
                        .map(|l| l as &mut dyn ContactListener);
                    let contact = &mut self.contacts[handle.0];
                    contact.update(colliders, bodies, &self.settings, listener);
                    i += 1;
                }
            }
        }
    }

    fn check_contact(
        &self,
        handle: ContactHandle,
        colliders: &ColliderSet,
        bodies: &BodySet,
    ) -> ContactUpdate {
        let contact = &self.contacts[handle.0];
        let co_a = &colliders[contact.collider_a()];
        let co_b = &colliders[contact.collider_b()];

        if !bodies.should_collide(co_a.body(), co_b.body()) {
            return ContactUpdate::Destroy;
        }

        if let Some(filter) = &self.filter {
            if !filter.should_collide(co_a, co_b) {
                return ContactUpdate::Destroy;
            }
        }

        if !bodies[co_a.body()].is_active() && !bodies[co_b.body()].is_active() {
            return ContactUpdate::Skip;
        }

        if !self.broad_phase.test_overlap(co_a.proxy(), co_b.proxy()) {
            return ContactUpdate::Destroy;
        }

        ContactUpdate::Update
    }

    /// Destroys a contact.
    ///
    /// If the two colliders were touching, the listener's [`ContactListener::end_contact`] is
    /// called first, while the contact is still linked to its colliders.
    pub fn destroy(&mut self, handle: ContactHandle, colliders: &mut ColliderSet) {
        let contact = &self.contacts[handle.0];

        if contact.is_overlapping() {
            if let Some(listener) = self.listener.as_deref_mut() {
                listener.end_contact(contact);
            }
        }

        let pair = *contact.pair();
        let list_index = contact.list_index;

        let _ = colliders[pair.collider_a].remove_edge(handle);
        let _ = colliders[pair.collider_b].remove_edge(handle);

        let _ = self.contact_list.swap_remove(list_index);
        if let Some(moved) = self.contact_list.get(list_index) {
            self.contacts[moved.0].list_index = list_index;
        }

        let _ = Contact::destroy(handle, &mut self.contacts);
    }

    /// Destroys all the contacts involving a collider.
    pub fn destroy_contacts_of(&mut self, collider: ColliderHandle, colliders: &mut ColliderSet) {
        while let Some(edge) = colliders
            .get(collider)
            .and_then(|c| c.contact_edges().first().copied())
        {
            self.destroy(edge.contact, colliders);
        }
    }
}
