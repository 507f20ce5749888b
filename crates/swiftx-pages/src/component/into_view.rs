//! IntoView trait and View enum for component rendering.
//!
//! A [`View`] is an immutable description of UI. It is turned into live
//! nodes by [`to_live_tree`](super::to_live_tree); a new tree is built for
//! every render.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use swiftx_core::reactive::{ReadState, State};

use super::node_ref::NodeRef;
use super::r#trait::{Component, ComponentView};
use crate::dom::{Event, EventHandler, EventType, Node};

/// Renderable content.
pub enum View {
	/// An element with attributes, listeners and children.
	Element(ElementView),
	/// A static text node.
	Text(Cow<'static, str>),
	/// A text node that follows a reactive string.
	Dynamic(ReadState<String>),
	/// Several views without a wrapper element.
	Fragment(Vec<View>),
	/// A component, invoked when the view is mounted.
	Component(ComponentView),
	/// A node that already exists, inserted as is.
	Node(Node),
	/// Renders nothing.
	Empty,
}

impl fmt::Debug for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Element(el) => fmt::Debug::fmt(el, f),
			Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
			Self::Dynamic(state) => f.debug_tuple("Dynamic").field(&state.get()).finish(),
			Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
			Self::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
			Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
			Self::Empty => f.write_str("Empty"),
		}
	}
}

impl View {
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(IntoView::into_view).collect())
	}

	pub fn empty() -> Self {
		Self::Empty
	}

	/// Wraps a [`Component`] so it is rendered at mount time.
	pub fn component<C: Component>(component: C) -> ComponentView {
		ComponentView::new(C::name(), move |children| component.render(children))
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}
}

/// A value bound to an attribute or a style property.
#[derive(Clone)]
pub enum AttrValue {
	Static(Cow<'static, str>),
	/// Re-applied on every change of the state.
	Dynamic(ReadState<String>),
	/// Boolean attribute: present when `true`, absent when `false`.
	Flag(bool),
	DynamicFlag(ReadState<bool>),
}

impl fmt::Debug for AttrValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(v) => f.debug_tuple("Static").field(v).finish(),
			Self::Dynamic(s) => f.debug_tuple("Dynamic").field(&s.get()).finish(),
			Self::Flag(v) => f.debug_tuple("Flag").field(v).finish(),
			Self::DynamicFlag(s) => f.debug_tuple("DynamicFlag").field(&s.get()).finish(),
		}
	}
}

impl From<&'static str> for AttrValue {
	fn from(value: &'static str) -> Self {
		Self::Static(Cow::Borrowed(value))
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		Self::Static(Cow::Owned(value))
	}
}

impl From<Cow<'static, str>> for AttrValue {
	fn from(value: Cow<'static, str>) -> Self {
		Self::Static(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Flag(value)
	}
}

impl From<State<String>> for AttrValue {
	fn from(state: State<String>) -> Self {
		Self::Dynamic(state.read_only())
	}
}

impl From<ReadState<String>> for AttrValue {
	fn from(state: ReadState<String>) -> Self {
		Self::Dynamic(state)
	}
}

impl From<State<bool>> for AttrValue {
	fn from(state: State<bool>) -> Self {
		Self::DynamicFlag(state.read_only())
	}
}

impl From<ReadState<bool>> for AttrValue {
	fn from(state: ReadState<bool>) -> Self {
		Self::DynamicFlag(state)
	}
}

/// A prop passed through [`ElementView::prop`].
///
/// The prop name and the kind of value decide where it ends up: `ref`
/// binds a [`NodeRef`], recognized event names bind listeners, `style`
/// binds inline styles, anything else becomes an attribute.
pub enum Prop {
	Value(AttrValue),
	Handler(EventHandler),
	Ref(NodeRef),
	Styles(Vec<(Cow<'static, str>, AttrValue)>),
}

impl Prop {
	pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
		Self::Handler(Rc::new(f))
	}

	pub fn styles<K, V>(styles: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<Cow<'static, str>>,
		V: Into<AttrValue>,
	{
		Self::Styles(
			styles
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

macro_rules! prop_from_attr {
	($($ty:ty),* $(,)?) => {$(
		impl From<$ty> for Prop {
			fn from(value: $ty) -> Self {
				Self::Value(value.into())
			}
		}
	)*};
}

prop_from_attr!(
	&'static str,
	String,
	Cow<'static, str>,
	bool,
	State<String>,
	ReadState<String>,
	State<bool>,
	ReadState<bool>,
	AttrValue,
);

impl From<NodeRef> for Prop {
	fn from(node_ref: NodeRef) -> Self {
		Self::Ref(node_ref)
	}
}

impl From<EventHandler> for Prop {
	fn from(handler: EventHandler) -> Self {
		Self::Handler(handler)
	}
}

/// Parses `"color: red; font-weight: bold"` into property/value pairs.
fn parse_style(style: &str) -> Vec<(Cow<'static, str>, AttrValue)> {
	style
		.split(';')
		.filter_map(|decl| decl.split_once(':'))
		.map(|(p, v)| (Cow::<'static, str>::Owned(p.trim().to_string()), AttrValue::from(v.trim().to_string())))
		.filter(|(p, _)| !p.is_empty())
		.collect()
}

/// An element in the view tree.
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, AttrValue)>,
	styles: Vec<(Cow<'static, str>, AttrValue)>,
	events: Vec<(EventType, EventHandler)>,
	node_ref: Option<NodeRef>,
	children: Vec<View>,
}

impl fmt::Debug for ElementView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementView")
			.field("tag", &self.tag)
			.field("attrs", &self.attrs)
			.field("styles", &self.styles)
			.field("events", &self.events.iter().map(|(t, _)| t).collect::<Vec<_>>())
			.field("children", &self.children)
			.finish()
	}
}

impl ElementView {
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			styles: Vec::new(),
			events: Vec::new(),
			node_ref: None,
			children: Vec::new(),
		}
	}

	/// Sets an attribute. States passed here keep the attribute in sync.
	pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	pub fn id(self, id: impl Into<AttrValue>) -> Self {
		self.attr("id", id)
	}

	pub fn class(self, class: impl Into<AttrValue>) -> Self {
		self.attr("class", class)
	}

	/// Sets one inline style property.
	pub fn style(mut self, property: impl Into<Cow<'static, str>>, value: impl Into<AttrValue>) -> Self {
		self.styles.push((property.into(), value.into()));
		self
	}

	pub fn on(mut self, event_type: impl Into<EventType>, handler: impl Fn(&Event) + 'static) -> Self {
		self.events.push((event_type.into(), Rc::new(handler)));
		self
	}

	pub fn on_click(self, handler: impl Fn(&Event) + 'static) -> Self {
		self.on(EventType::Click, handler)
	}

	pub fn node_ref(mut self, node_ref: &NodeRef) -> Self {
		self.node_ref = Some(node_ref.clone());
		self
	}

	/// Routes a named prop to an attribute, style, listener or ref.
	pub fn prop(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<Prop>) -> Self {
		let name = name.into();
		match value.into() {
			Prop::Ref(node_ref) => {
				if name != "ref" {
					crate::dev_warn!("Prop `{}` received a ref; binding it as `ref`", name);
				}
				self.node_ref = Some(node_ref);
			}
			Prop::Handler(handler) => {
				let event_type =
					EventType::from_prop_name(&name).unwrap_or_else(|| EventType::from(name.as_ref()));
				self.events.push((event_type, handler));
			}
			Prop::Styles(styles) => self.styles.extend(styles),
			Prop::Value(AttrValue::Static(style)) if name == "style" => {
				self.styles.extend(parse_style(&style));
			}
			Prop::Value(value) => self.attrs.push((name, value)),
		}
		self
	}

	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	pub fn attrs(&self) -> &[(Cow<'static, str>, AttrValue)] {
		&self.attrs
	}

	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	pub fn event_types(&self) -> impl Iterator<Item = &EventType> {
		self.events.iter().map(|(t, _)| t)
	}

	pub(crate) fn into_parts(self) -> ElementParts {
		ElementParts {
			tag: self.tag,
			attrs: self.attrs,
			styles: self.styles,
			events: self.events,
			node_ref: self.node_ref,
			children: self.children,
		}
	}
}

pub(crate) struct ElementParts {
	pub(crate) tag: Cow<'static, str>,
	pub(crate) attrs: Vec<(Cow<'static, str>, AttrValue)>,
	pub(crate) styles: Vec<(Cow<'static, str>, AttrValue)>,
	pub(crate) events: Vec<(EventType, EventHandler)>,
	pub(crate) node_ref: Option<NodeRef>,
	pub(crate) children: Vec<View>,
}

/// Children handed to a component.
#[derive(Debug, Default)]
pub struct Children(Vec<View>);

impl Children {
	pub fn new(children: Vec<View>) -> Self {
		Self(children)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_vec(self) -> Vec<View> {
		self.0
	}
}

impl IntoIterator for Children {
	type Item = View;
	type IntoIter = std::vec::IntoIter<View>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Conversion into a [`View`].
pub trait IntoView {
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for ComponentView {
	fn into_view(self) -> View {
		View::Component(self)
	}
}

impl IntoView for Children {
	fn into_view(self) -> View {
		View::Fragment(self.0)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl IntoView for Cow<'static, str> {
	fn into_view(self) -> View {
		View::Text(self)
	}
}

macro_rules! into_view_display {
	($($ty:ty),* $(,)?) => {$(
		impl IntoView for $ty {
			fn into_view(self) -> View {
				View::Text(Cow::Owned(self.to_string()))
			}
		}
	)*};
}

into_view_display!(i32, i64, u32, u64, usize, isize, f32, f64, char);

impl IntoView for ReadState<String> {
	fn into_view(self) -> View {
		View::Dynamic(self)
	}
}

impl IntoView for State<String> {
	fn into_view(self) -> View {
		View::Dynamic(self.read_only())
	}
}

impl IntoView for Node {
	fn into_view(self) -> View {
		View::Node(self)
	}
}

impl<V: IntoView> IntoView for Vec<V> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(IntoView::into_view).collect())
	}
}

impl<V: IntoView> IntoView for Option<V> {
	fn into_view(self) -> View {
		self.map_or(View::Empty, IntoView::into_view)
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_prop_routes_by_name_and_value() {
		let node_ref = NodeRef::new();
		let el = ElementView::new("button")
			.prop("class", "primary")
			.prop("disabled", true)
			.prop("click", Prop::handler(|_| {}))
			.prop("onMouseEnter", Prop::handler(|_| {}))
			.prop("style", "color: red; font-weight : bold;")
			.prop("ref", node_ref);

		let parts = el.into_parts();
		assert_eq!(parts.attrs.len(), 2);
		assert_eq!(parts.styles.len(), 2);
		assert_eq!(parts.styles[1].0, "font-weight");
		assert_eq!(
			parts.events.iter().map(|(t, _)| t.clone()).collect::<Vec<_>>(),
			vec![EventType::Click, EventType::MouseEnter]
		);
		assert!(parts.node_ref.is_some());
	}

	#[rstest]
	fn test_unknown_handler_name_becomes_custom_event() {
		let el = ElementView::new("div").prop("swiftx:open", Prop::handler(|_| {}));
		let types: Vec<_> = el.event_types().cloned().collect();
		assert_eq!(types, vec![EventType::Custom("swiftx:open".to_string())]);
	}

	#[rstest]
	fn test_into_view_conversions() {
		assert!(matches!(42.into_view(), View::Text(t) if t == "42"));
		assert!(matches!(None::<&str>.into_view(), View::Empty));
		assert!(matches!(vec!["a", "b"].into_view(), View::Fragment(v) if v.len() == 2));
		let name = State::new("Ada".to_string());
		assert!(matches!(name.into_view(), View::Dynamic(_)));
	}
}
