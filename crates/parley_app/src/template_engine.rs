use anyhow::Context as _;
use handlebars::{Handlebars, no_escape};
use include_dir::{Dir, DirEntry, File, include_dir};
use serde::Serialize;

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/../../templates");

/// Renders the prompt templates embedded from the workspace `templates/`
/// directory. Rendering is strict: a variable missing from the data is an
/// error rather than an empty string.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> anyhow::Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);

        for file in files(&TEMPLATES) {
            let name = file.path().to_string_lossy();
            let content = file
                .contents_utf8()
                .with_context(|| format!("Embedded template '{name}' is not valid UTF-8"))?;
            handlebars
                .register_template_string(&name, content)
                .with_context(|| format!("Failed to register template '{name}'"))?;
        }

        Ok(Self { handlebars })
    }

    pub fn render(&self, name: &str, data: &impl Serialize) -> anyhow::Result<String> {
        self.handlebars
            .render(name, data)
            .with_context(|| format!("Failed to render template '{name}'"))
    }
}

fn files(dir: &'static Dir<'static>) -> impl Iterator<Item = &'static File<'static>> {
    dir.entries().iter().flat_map(walk_entry)
}

fn walk_entry(entry: &'static DirEntry<'static>) -> Box<dyn Iterator<Item = &'static File<'static>>> {
    match entry {
        DirEntry::File(f) => Box::new(std::iter::once(f)),
        DirEntry::Dir(d) => Box::new(d.entries().iter().flat_map(walk_entry)),
    }
}
