//! Rich-Text Resolution
//!
//! Rewrites one rich-text element's markup in three ordered passes:
//!
//! 1. **Link rewriting** - anchors referencing an item by id get their
//!    `href` replaced through the configured link-URL resolver, or through
//!    the broken-link resolver when the id is missing from the element's
//!    `links` side table.
//! 2. **Post-processing** - an ordered chain of pure `String -> String`
//!    functions over the cumulative output; runs even when no link or
//!    inline resolution is configured.
//! 3. **Inline expansion** - embedded-item placeholders are resolved
//!    through the containing item's linked-item scope, converted, and
//!    rendered by the first matching inline renderer; nested rich text
//!    recurses with the same per-call visited set, so reference cycles
//!    terminate with the repeated placeholder left verbatim.
//!
//! Anything unresolvable — missing link entry without a broken-link
//! resolver, missing linked item, no matching renderer, revisited codename —
//! leaves the original markup fragment untouched. Resolution never fails.

mod markup;

use crate::convert::{ContentConverter, ConvertedItem, TraversalState};
use crate::models::{ItemLink, LinkedItemSet, RichTextContent};
use regex::Captures;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Link metadata handed to the link-URL resolver for one anchor.
#[derive(Debug, Clone, Copy)]
pub struct ItemLinkContext<'a> {
    /// Id the anchor references
    pub item_id: &'a str,

    /// Content type codename of the linked item
    pub content_type: &'a str,

    /// Codename of the linked item
    pub codename: &'a str,

    /// URL slug of the linked item; may be empty
    pub url_slug: &'a str,
}

/// Context handed to the broken-link resolver when an anchor's id is not in
/// the `links` side table (e.g. the item is unpublished).
#[derive(Debug, Clone, Copy)]
pub struct BrokenLinkContext<'a> {
    pub item_id: &'a str,
}

/// Produces the final href for a resolvable item link.
pub type LinkUrlResolver = Box<dyn Fn(&ItemLinkContext<'_>) -> String + Send + Sync>;

/// Produces the final href for an unresolvable item link.
pub type BrokenLinkResolver = Box<dyn Fn(&BrokenLinkContext<'_>) -> String + Send + Sync>;

/// One step of the post-processor chain.
pub type RichTextProcessor = Box<dyn Fn(String) -> String + Send + Sync>;

/// Renders an inline-embedded item when its predicate matches.
pub struct InlineItemRenderer {
    predicate: Box<dyn Fn(&ConvertedItem) -> bool + Send + Sync>,
    render: Box<dyn Fn(&ConvertedItem) -> String + Send + Sync>,
}

impl InlineItemRenderer {
    pub fn new(
        predicate: impl Fn(&ConvertedItem) -> bool + Send + Sync + 'static,
        render: impl Fn(&ConvertedItem) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            render: Box::new(render),
        }
    }
}

/// Caller-supplied resolution configuration.
///
/// Processors and renderers run in the order they were added; the first
/// renderer whose predicate matches wins.
///
/// # Examples
///
/// ```rust
/// use tessera_core::richtext::RichTextOptions;
///
/// let options = RichTextOptions::new()
///     .with_link_resolver(|link| format!("/articles/{}", link.url_slug))
///     .with_broken_link_resolver(|_| "/404".to_string())
///     .with_processor(|markup| markup.replace("<br>", "<br/>"));
/// ```
#[derive(Default)]
pub struct RichTextOptions {
    link_resolver: Option<LinkUrlResolver>,
    broken_link_resolver: Option<BrokenLinkResolver>,
    processors: Vec<RichTextProcessor>,
    inline_renderers: Vec<InlineItemRenderer>,
}

impl RichTextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolver producing hrefs for resolvable item links.
    /// Without one, those anchors keep their original href.
    pub fn with_link_resolver(
        mut self,
        resolve: impl Fn(&ItemLinkContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.link_resolver = Some(Box::new(resolve));
        self
    }

    /// Set the resolver producing hrefs for broken item links.
    /// Without one, those anchors keep their original href.
    pub fn with_broken_link_resolver(
        mut self,
        resolve: impl Fn(&BrokenLinkContext<'_>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.broken_link_resolver = Some(Box::new(resolve));
        self
    }

    /// Append a post-processor to the chain.
    pub fn with_processor(
        mut self,
        process: impl Fn(String) -> String + Send + Sync + 'static,
    ) -> Self {
        self.processors.push(Box::new(process));
        self
    }

    /// Append an inline-item renderer (predicate + render pair).
    pub fn with_inline_renderer(
        mut self,
        predicate: impl Fn(&ConvertedItem) -> bool + Send + Sync + 'static,
        render: impl Fn(&ConvertedItem) -> String + Send + Sync + 'static,
    ) -> Self {
        self.inline_renderers
            .push(InlineItemRenderer::new(predicate, render));
        self
    }
}

/// The rich-text resolver: [`RichTextOptions`] plus the resolution passes.
///
/// Holds no per-call state — the visited set and conversion stack live in
/// the per-call traversal state — so one resolver serves any number of
/// concurrent resolutions.
#[derive(Default)]
pub struct RichTextResolver {
    options: RichTextOptions,
}

impl RichTextResolver {
    pub fn new(options: RichTextOptions) -> Self {
        Self { options }
    }

    /// Run the three passes over one element's content.
    ///
    /// `scope` is the linked-item set of the response the containing item
    /// was delivered in; `state` carries the visited set of the enclosing
    /// top-level call.
    pub(crate) fn resolve_content(
        &self,
        content: &RichTextContent<'_>,
        scope: &LinkedItemSet,
        converter: &ContentConverter<'_>,
        state: &mut TraversalState,
    ) -> String {
        let mut output = self.rewrite_links(content.value, content.links);

        for process in &self.options.processors {
            output = process(output);
        }

        self.expand_inline_items(&output, scope, converter, state)
    }

    fn rewrite_links(&self, value: &str, links: &HashMap<String, ItemLink>) -> String {
        if self.options.link_resolver.is_none() && self.options.broken_link_resolver.is_none() {
            return value.to_string();
        }

        markup::ITEM_ANCHOR
            .replace_all(value, |caps: &Captures<'_>| {
                let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                let item_id = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

                let href = match links.get(item_id) {
                    Some(link) => self.options.link_resolver.as_ref().map(|resolve| {
                        resolve(&ItemLinkContext {
                            item_id,
                            content_type: &link.content_type,
                            codename: &link.codename,
                            url_slug: &link.url_slug,
                        })
                    }),
                    None => {
                        trace!("item link '{}' not in links table", item_id);
                        self.options
                            .broken_link_resolver
                            .as_ref()
                            .map(|resolve| resolve(&BrokenLinkContext { item_id }))
                    }
                };

                match href {
                    Some(href) => markup::set_anchor_href(tag, &href),
                    None => tag.to_string(),
                }
            })
            .into_owned()
    }

    fn expand_inline_items(
        &self,
        value: &str,
        scope: &LinkedItemSet,
        converter: &ContentConverter<'_>,
        state: &mut TraversalState,
    ) -> String {
        markup::OBJECT_TAG
            .replace_all(value, |caps: &Captures<'_>| {
                let tag = caps.get(0).map(|m| m.as_str()).unwrap_or_default();

                let Some(codename) = markup::inline_item_codename(tag) else {
                    return tag.to_string();
                };

                if state.already_visited(codename) {
                    debug!(
                        "inline item '{}' already expanded in this call, leaving placeholder",
                        codename
                    );
                    return tag.to_string();
                }

                let Some(item) = scope.get(codename) else {
                    trace!("inline item '{}' not in response scope", codename);
                    return tag.to_string();
                };

                state.visit(codename);
                let converted = converter.convert_with_state(item, scope, state);

                match self.render_inline(&converted) {
                    Some(replacement) => replacement,
                    None => tag.to_string(),
                }
            })
            .into_owned()
    }

    fn render_inline(&self, converted: &ConvertedItem) -> Option<String> {
        self.options
            .inline_renderers
            .iter()
            .find(|renderer| (renderer.predicate)(converted))
            .map(|renderer| (renderer.render)(converted))
    }
}
