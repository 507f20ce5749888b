//! Keyed list rendering.
//!
//! [`for_each`] renders one entry per item, each bracketed by a start and
//! an end marker comment, all placed in front of a trailing anchor. On
//! every change of the source the entries are reconciled by key:
//!
//! - an item whose key already has an entry reuses it; if the item changed
//!   (under `PartialEq`) only the nodes between that entry's markers are
//!   rebuilt, the markers themselves stay the same nodes
//! - entries are moved, marker range by marker range, in front of the
//!   anchor in the new order
//! - entries whose key disappeared are removed and disposed
//!
//! A missing key falls back to the item's index. When two items produce the
//! same key, the first keeps it and the later one falls back to its index.
//! Both cases log a development warning.
//!
//! ## Example
//!
//! ```ignore
//! use swiftx_pages::component::{for_each, ListKey};
//!
//! let users = State::new(vec![User { id: 1, name: "Ada".into() }]);
//! let list = View::element("ul").child(for_each(
//!     users.clone(),
//!     ListKey::by(|u: &User| Some(u.id)),
//!     |u, _| View::element("li").child(u.name.clone()).into_view(),
//! ));
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use swiftx_core::reactive::{ReadState, State};

use super::into_view::View;
use super::mount::to_live_tree;
use crate::dom::{Node, document};

/// Items rendered by [`for_each`].
pub enum ListSource<T: 'static> {
	Static(Vec<T>),
	Reactive(ReadState<Vec<T>>),
}

impl<T: 'static> From<Vec<T>> for ListSource<T> {
	fn from(items: Vec<T>) -> Self {
		Self::Static(items)
	}
}

impl<T: 'static> From<State<Vec<T>>> for ListSource<T> {
	fn from(state: State<Vec<T>>) -> Self {
		Self::Reactive(state.read_only())
	}
}

impl<T: 'static> From<ReadState<Vec<T>>> for ListSource<T> {
	fn from(state: ReadState<Vec<T>>) -> Self {
		Self::Reactive(state)
	}
}

/// How entries are keyed.
pub enum ListKey<T, K> {
	/// Key by position.
	Index,
	/// Key by an extracted value; `None` falls back to the position.
	By(Rc<dyn Fn(&T) -> Option<K>>),
}

impl<T, K> ListKey<T, K> {
	pub fn by(extract: impl Fn(&T) -> Option<K> + 'static) -> Self {
		Self::By(Rc::new(extract))
	}
}

impl<T> ListKey<T, usize> {
	pub fn index() -> Self {
		Self::Index
	}
}

/// Resolved key of a list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey<K> {
	Key(K),
	Index(usize),
}

struct Entry<T> {
	item: T,
	start: Node,
	end: Node,
}

struct ForEachNode<T, K> {
	anchor: Node,
	entries: RefCell<HashMap<EntryKey<K>, Entry<T>>>,
	order: RefCell<Vec<EntryKey<K>>>,
	key: ListKey<T, K>,
	render: Box<dyn Fn(&T, usize) -> View>,
	flush_scheduled: Cell<bool>,
}

/// Nodes from `start` to `end`, both included.
fn marker_range(start: &Node, end: &Node) -> Vec<Node> {
	let mut nodes = vec![start.clone()];
	let mut current = start.next_sibling();
	while let Some(node) = current {
		nodes.push(node.clone());
		if &node == end {
			break;
		}
		current = node.next_sibling();
	}
	nodes
}

fn insert(parent: &Node, node: &Node, before: Option<&Node>) {
	if let Err(err) = parent.insert_before(node, before) {
		crate::error_log!("ForEach: failed to insert entry: {}", err);
	}
}

impl<T, K> ForEachNode<T, K>
where
	T: Clone + PartialEq + 'static,
	K: Clone + Eq + Hash + fmt::Debug + 'static,
{
	fn resolve_key(&self, item: &T, index: usize, taken: &HashSet<EntryKey<K>>) -> EntryKey<K> {
		let ListKey::By(extract) = &self.key else {
			return EntryKey::Index(index);
		};
		match extract(item) {
			None => {
				crate::dev_warn!(
					"ForEach: item at index {} has no key, falling back to its index",
					index
				);
				EntryKey::Index(index)
			}
			Some(key) => {
				let key = EntryKey::Key(key);
				if taken.contains(&key) {
					crate::dev_warn!(
						"ForEach: duplicate key {:?} at index {}, falling back to its index",
						key,
						index
					);
					EntryKey::Index(index)
				} else {
					key
				}
			}
		}
	}

	fn render_item(&self, item: &T, index: usize) -> Option<Node> {
		match to_live_tree((self.render)(item, index)) {
			Ok(live) => Some(live),
			Err(err) => {
				crate::error_log!("ForEach: failed to render item {}: {}", index, err);
				None
			}
		}
	}

	fn create(&self, item: &T, index: usize) -> Entry<T> {
		let doc = document();
		let holder = doc.create_document_fragment();
		let start = doc.create_comment("swiftx:item-start");
		let end = doc.create_comment("swiftx:item-end");
		insert(&holder, &start, None);
		if let Some(live) = self.render_item(item, index) {
			insert(&holder, &live, None);
		}
		insert(&holder, &end, None);
		Entry {
			item: item.clone(),
			start,
			end,
		}
	}

	/// Replaces the nodes between the entry's markers.
	fn rebuild(&self, entry: &mut Entry<T>, item: &T, index: usize) {
		let range = marker_range(&entry.start, &entry.end);
		let inner = range.len().saturating_sub(2);
		for node in range.iter().skip(1).take(inner) {
			node.remove();
			node.dispose();
		}
		if let (Some(parent), Some(live)) = (entry.end.parent(), self.render_item(item, index)) {
			insert(&parent, &live, Some(&entry.end));
		}
		entry.item = item.clone();
	}

	/// Moves the entry's marker range in front of the anchor.
	fn place(&self, start: &Node, end: &Node) -> bool {
		let Some(parent) = self.anchor.parent() else {
			return false;
		};
		for node in marker_range(start, end) {
			insert(&parent, &node, Some(&self.anchor));
		}
		true
	}

	fn remove_entry(entry: Entry<T>) {
		for node in marker_range(&entry.start, &entry.end) {
			node.remove();
			node.dispose();
		}
	}

	fn reconcile(self: &Rc<Self>, items: &[T]) {
		let mut seen = HashSet::with_capacity(items.len());
		let mut order = Vec::with_capacity(items.len());

		for (index, item) in items.iter().enumerate() {
			let key = self.resolve_key(item, index, &seen);
			seen.insert(key.clone());

			let existing = self.entries.borrow_mut().remove(&key);
			let entry = match existing {
				Some(mut entry) => {
					if entry.item != *item {
						self.rebuild(&mut entry, item, index);
					}
					entry
				}
				None => self.create(item, index),
			};
			self.place(&entry.start, &entry.end);
			self.entries.borrow_mut().insert(key.clone(), entry);
			order.push(key);
		}

		let stale: Vec<Entry<T>> = {
			let mut entries = self.entries.borrow_mut();
			let keys: Vec<EntryKey<K>> = entries
				.keys()
				.filter(|key| !seen.contains(*key))
				.cloned()
				.collect();
			keys.iter().filter_map(|key| entries.remove(key)).collect()
		};
		for entry in stale {
			Self::remove_entry(entry);
		}

		*self.order.borrow_mut() = order;
		if !self.anchor.is_attached() {
			self.schedule_flush();
		}
	}

	fn schedule_flush(self: &Rc<Self>) {
		if self.flush_scheduled.replace(true) {
			return;
		}
		let this = Rc::clone(self);
		self.anchor.when_attached(move || {
			this.flush_scheduled.set(false);
			this.flush();
		});
	}

	/// Places every entry, in order, once the anchor is attached.
	fn flush(&self) {
		let ranges: Vec<(Node, Node)> = {
			let entries = self.entries.borrow();
			self.order
				.borrow()
				.iter()
				.filter_map(|key| entries.get(key))
				.map(|entry| (entry.start.clone(), entry.end.clone()))
				.collect()
		};
		for (start, end) in ranges {
			if !self.place(&start, &end) {
				return;
			}
		}
	}
}

/// Renders `source` as a keyed list.
pub fn for_each<T, K, R>(source: impl Into<ListSource<T>>, key: ListKey<T, K>, render: R) -> View
where
	T: Clone + PartialEq + 'static,
	K: Clone + Eq + Hash + fmt::Debug + 'static,
	R: Fn(&T, usize) -> View + 'static,
{
	let anchor = document().create_comment("swiftx:for-each");
	let node = Rc::new(ForEachNode {
		anchor: anchor.clone(),
		entries: RefCell::new(HashMap::new()),
		order: RefCell::new(Vec::new()),
		key,
		render: Box::new(render),
		flush_scheduled: Cell::new(false),
	});

	match source.into() {
		ListSource::Static(items) => node.reconcile(&items),
		ListSource::Reactive(state) => {
			state.with(|items| node.reconcile(items));
			let observer = Rc::clone(&node);
			let subscription = state.subscribe(move |items| observer.reconcile(items));
			anchor.on_cleanup(move || subscription.unsubscribe());
		}
	}

	View::Node(anchor)
}

/// Renders `source` keyed by position.
pub fn for_each_indexed<T, R>(source: impl Into<ListSource<T>>, render: R) -> View
where
	T: Clone + PartialEq + 'static,
	R: Fn(&T, usize) -> View + 'static,
{
	for_each(source, ListKey::index(), render)
}
