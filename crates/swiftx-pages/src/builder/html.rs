//! HTML and SVG tag constructors.

use std::borrow::Cow;

use crate::component::{Component, ComponentView, ElementView, View};

/// Creates an element with any tag name.
pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
	ElementView::new(tag)
}

/// Wraps a component so it can be placed in a tree.
pub fn component<C: Component>(component: C) -> ComponentView {
	View::component(component)
}

/// Macro for defining element creation functions
macro_rules! define_element {
	($($(#[$meta:meta])* $name:ident => $tag:literal),* $(,)?) => {$(
		$(#[$meta])*
		pub fn $name() -> ElementView {
			ElementView::new($tag)
		}
	)*};
}

define_element!(
	/// Create a `<div>` element
	div => "div",
	/// Create a `<span>` element
	span => "span",
	/// Create a `<p>` element (paragraph)
	p => "p",
	/// Create an `<a>` element (anchor)
	a => "a",
	/// Create a `<button>` element
	button => "button",
	/// Create an `<input>` element
	input => "input",
	/// Create a `<label>` element
	label => "label",
	/// Create a `<form>` element
	form => "form",
	/// Create a `<ul>` element (unordered list)
	ul => "ul",
	/// Create an `<ol>` element (ordered list)
	ol => "ol",
	/// Create a `<li>` element (list item)
	li => "li",
	h1 => "h1",
	h2 => "h2",
	h3 => "h3",
	header => "header",
	footer => "footer",
	nav => "nav",
	main => "main",
	section => "section",
	article => "article",
	table => "table",
	thead => "thead",
	tbody => "tbody",
	tr => "tr",
	th => "th",
	td => "td",
	img => "img",
	/// Create an `<svg>` element; it and its descendants use the SVG namespace
	svg => "svg",
	circle => "circle",
	rect => "rect",
	path => "path",
	g => "g",
);

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::to_live_tree;
	use crate::dom::SVG_NAMESPACE;
	use rstest::rstest;

	#[rstest]
	#[case(div(), "div")]
	#[case(li(), "li")]
	#[case(element("custom-el"), "custom-el")]
	fn test_constructors_set_tag(#[case] el: ElementView, #[case] tag: &str) {
		assert_eq!(el.tag_name(), tag);
	}

	#[rstest]
	fn test_svg_helpers_mount_in_svg_namespace() {
		let node = to_live_tree(svg().child(g().child(circle().attr("r", "2")))).unwrap();
		let circle = node.query_selector("circle").unwrap();
		assert_eq!(circle.namespace_uri(), Some(SVG_NAMESPACE));
	}
}
