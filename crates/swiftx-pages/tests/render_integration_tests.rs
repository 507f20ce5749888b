//! Integration tests for the renderer
//!
//! These tests verify:
//! 1. Views mount as live nodes with attributes, styles and text
//! 2. Reactive attributes and text follow their state
//! 3. Events bubble and can prevent the default action
//! 4. Components receive their children and SVG switches namespace
//! 5. Disposal releases reactive bindings

use std::cell::Cell;
use std::rc::Rc;

use swiftx_pages::builder::html::{button, circle, div, li, span, svg, ul};
use swiftx_pages::component::{
	Children, Component, ComponentView, IntoView, Prop, View, render, to_live_tree,
};
use swiftx_pages::dom::{Namespace, SVG_NAMESPACE, document};
use swiftx_pages::reactive::State;

struct Card {
	title: &'static str,
}

impl Component for Card {
	fn render(&self, children: Children) -> View {
		div()
			.class("card")
			.child(span().child(self.title))
			.child(children)
			.into_view()
	}

	fn name() -> &'static str {
		"Card"
	}
}

/// Success Criterion 1: static markup
#[test]
fn test_static_tree_serializes() {
	let view = ul()
		.id("list")
		.child(li().class("item").child("one"))
		.child(li().style("color", "red").child("two"));
	let live = to_live_tree(view).unwrap();
	assert_eq!(
		live.to_html(),
		r#"<ul id="list"><li class="item">one</li><li style="color: red;">two</li></ul>"#
	);
}

/// Success Criterion 1: generic props route to attributes, styles and refs
#[test]
fn test_prop_routing() {
	let live = to_live_tree(
		div()
			.prop("title", "hello")
			.prop("style", "margin: 0; padding: 4px")
			.prop("disabled", true),
	)
	.unwrap();
	assert_eq!(live.get_attribute("title").as_deref(), Some("hello"));
	assert_eq!(live.style("padding").as_deref(), Some("4px"));
	assert!(live.has_attribute("disabled"));

	let clicked = Rc::new(Cell::new(false));
	let flag = clicked.clone();
	let live = to_live_tree(button().prop("onClick", Prop::handler(move |_| flag.set(true)))).unwrap();
	live.click();
	assert!(clicked.get());
}

/// Success Criterion 2: reactive text and attributes
#[test]
fn test_reactive_bindings_update_in_place() {
	let label = State::new(String::from("draft"));
	let busy = State::new(false);
	let live = to_live_tree(
		button()
			.attr("data-state", label.clone())
			.attr("disabled", busy.clone())
			.child(label.clone()),
	)
	.unwrap();
	let text_node = live.first_child().unwrap();

	label.set(String::from("saved"));
	busy.set(true);
	assert_eq!(live.text_content(), "saved");
	assert_eq!(live.get_attribute("data-state").as_deref(), Some("saved"));
	assert!(live.has_attribute("disabled"));
	assert_eq!(live.first_child(), Some(text_node));
}

/// Success Criterion 3: bubbling and default prevention
#[test]
fn test_events_bubble_to_ancestors() {
	let outer_hits = Rc::new(Cell::new(0));
	let hits = outer_hits.clone();
	let live = to_live_tree(
		div()
			.on_click(move |_| hits.set(hits.get() + 1))
			.child(button().on_click(|event| event.prevent_default()).child("go")),
	)
	.unwrap();
	let inner = live.query_selector("button").unwrap();

	let proceeded = inner.click();
	assert!(!proceeded);
	assert_eq!(outer_hits.get(), 1);
}

/// Success Criterion 4: components and closures receive children
#[test]
fn test_components_receive_children() {
	let card = View::component(Card { title: "Profile" }).child("body");
	let wrapper = ComponentView::new("Wrapper", |children| {
		div().class("wrapper").children(children).into_view()
	})
	.child(card);

	let container = document().create_element("main");
	render(wrapper, &container).unwrap();
	assert_eq!(
		container.to_html(),
		r#"<main><div class="wrapper"><div class="card"><span>Profile</span>body</div></div></main>"#
	);
}

/// Success Criterion 4: `svg` switches the namespace for its subtree
#[test]
fn test_svg_namespace() {
	let live = to_live_tree(div().child(svg().child(circle().attr("r", "4")))).unwrap();
	let shape = live.query_selector("circle").unwrap();
	assert_eq!(shape.namespace(), Some(Namespace::Svg));
	assert_eq!(shape.namespace_uri(), Some(SVG_NAMESPACE));
	assert_eq!(live.namespace(), Some(Namespace::Html));
}

/// Success Criterion 5: re-rendering a container disposes old bindings
#[test]
fn test_render_disposes_previous_content() {
	let label = State::new(String::from("a"));
	let container = document().create_element("div");
	render(span().child(label.clone()), &container).unwrap();
	assert_eq!(label.subscriber_count(), 1);

	render("plain", &container).unwrap();
	assert_eq!(label.subscriber_count(), 0);
	assert_eq!(container.text_content(), "plain");
}
