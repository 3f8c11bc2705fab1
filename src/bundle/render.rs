//! Markup for bundles: inline content or a link to the delivery route.

use super::Bundle;
use crate::context::Context;
use crate::error::Result;
use crate::template::{InlineVars, LinkedVars};

impl Bundle {
    /// Render the whole bundle.
    ///
    /// Inline: the inline template with `{content}` and `{mimetype}`.
    /// Linked: the linked template with `{mimetype}` and the hash-addressed
    /// `{url}`.
    pub fn render(&self, cx: &Context<'_>, inline: bool) -> Result<String> {
        if inline {
            let content = self.content(cx)?;
            Ok(self.inline_template.render(&InlineVars {
                content: &content,
                mimetype: &self.mimetype,
            }))
        } else {
            let url = self.url(cx)?;
            Ok(self.linked_template.render(&LinkedVars {
                url: &url,
                mimetype: &self.mimetype,
            }))
        }
    }

    /// Render one tag per asset, joined by newlines.
    ///
    /// Inline tags hold each asset's content after the bundle pipeline; linked
    /// tags point at the per-asset delivery route.
    pub fn render_assets(&self, cx: &Context<'_>, inline: bool) -> Result<String> {
        let tags: Vec<String> = if inline {
            self.contents(cx)?
                .iter()
                .map(|content| {
                    self.inline_template.render(&InlineVars {
                        content,
                        mimetype: &self.mimetype,
                    })
                })
                .collect()
        } else {
            (0..self.assets.len())
                .filter_map(|index| self.asset_url(cx, index))
                .map(|url| {
                    self.linked_template.render(&LinkedVars {
                        url: &url,
                        mimetype: &self.mimetype,
                    })
                })
                .collect()
        };
        Ok(tags.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use crate::asset::Asset;
    use crate::bundle::{Bundle, version};
    use crate::context::{Context, Environment};
    use crate::error::ProcessorError;
    use crate::processor::ProcessorRegistry;

    fn test1(content: &str) -> Result<String, ProcessorError> {
        Ok(format!("FOOBAR{content}"))
    }

    fn test2(content: &str) -> Result<String, ProcessorError> {
        Ok(format!("{content}BARFOO"))
    }

    fn registry() -> ProcessorRegistry {
        let mut registry = ProcessorRegistry::with_defaults();
        registry.register_fn("test1", test1);
        registry.register_fn("test2", test2);
        registry
    }

    fn test_bundle() -> Bundle {
        Bundle::new("test_bundle")
            .with_assets([
                Asset::new("first asset").with_processors(["test1"]),
                Asset::new("second asset"),
            ])
            .with_processors(["test2"])
    }

    #[test]
    fn test_render_inline() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        assert_eq!(
            test_bundle().render(&cx, true).unwrap(),
            "FOOBARfirst assetsecond assetBARFOO"
        );

        let css = Bundle::css("site").with_asset(Asset::new("a{color:red}"));
        assert_eq!(
            css.render(&cx, true).unwrap(),
            r#"<style type="text/css">a{color:red}</style>"#
        );
    }

    #[test]
    fn test_render_linked() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let bundle = test_bundle();
        let hash = version::content_hash("FOOBARfirst assetsecond assetBARFOO");
        assert_eq!(
            bundle.render(&cx, false).unwrap(),
            format!(
                "<link ref='external' href='/_compressor/bundle/test_bundle_v{hash}.txt' type='text/plain'>"
            )
        );

        let js = Bundle::js("app").with_asset(Asset::new("run();"));
        let hash = version::content_hash("run();");
        assert_eq!(
            js.render(&cx, false).unwrap(),
            format!(
                r#"<script type="text/javascript" src="/_compressor/bundle/app_v{hash}.js"></script>"#
            )
        );
    }

    #[test]
    fn test_render_linked_with_custom_prefix() {
        let env = Environment::default().with_url_prefix("/static/bundles/");
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let bundle = Bundle::css("site").with_asset(Asset::new("a{}"));
        let rendered = bundle.render(&cx, false).unwrap();
        assert!(rendered.contains(r#"href="/static/bundles/bundle/site_v"#));
    }

    #[test]
    fn test_render_assets_inline() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        assert_eq!(
            test_bundle().render_assets(&cx, true).unwrap(),
            "FOOBARfirst assetBARFOO\nsecond assetBARFOO"
        );
    }

    #[test]
    fn test_render_assets_linked() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        assert_eq!(
            test_bundle().render_assets(&cx, false).unwrap(),
            "<link ref='external' href='/_compressor/bundle/test_bundle/asset/0/' type='text/plain'>\n\
             <link ref='external' href='/_compressor/bundle/test_bundle/asset/1/' type='text/plain'>"
        );
    }

    #[test]
    fn test_custom_templates() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let bundle = Bundle::css("site")
            .with_asset(Asset::new("a{}"))
            .with_inline_template("<style media=\"print\">{content}</style>")
            .unwrap()
            .with_linked_template("{url}")
            .unwrap();

        assert_eq!(
            bundle.render(&cx, true).unwrap(),
            "<style media=\"print\">a{}</style>"
        );
        assert_eq!(bundle.render(&cx, false).unwrap(), bundle.url(&cx).unwrap());
    }
}
