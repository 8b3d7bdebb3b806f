//! Indented XML writer

/// Indentation used for nested elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    #[default]
    Tab,
    Spaces(usize),
}

impl IndentStyle {
    fn unit(&self) -> String {
        match self {
            IndentStyle::Tab => "\t".to_string(),
            IndentStyle::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// Streaming XML writer; one element per line
pub struct XmlWriter {
    output: String,
    indent_unit: String,
    indent_level: usize,
}

impl XmlWriter {
    pub fn new(style: IndentStyle) -> Self {
        Self {
            output: String::new(),
            indent_unit: style.unit(),
            indent_level: 0,
        }
    }

    /// Get the written document, always ending in a newline
    pub fn finish(mut self) -> String {
        if !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.output
    }

    pub fn write_declaration(&mut self) {
        self.output
            .push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    /// Open `<name attr="..">` on its own line and indent what follows
    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.output.push_str(">\n");
        self.indent_level += 1;
    }

    /// Write a self-closing `<name attr=".." />` line
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.output.push_str(" />\n");
    }

    /// Write `<name attr="..">text</name>` on one line
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) {
        self.start_tag(name, attrs);
        self.output.push('>');
        self.output.push_str(&escape(text, false));
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push_str(">\n");
    }

    /// Dedent and write `</name>`
    pub fn close(&mut self, name: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.write_indent();
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push_str(">\n");
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.write_indent();
        self.output.push('<');
        self.output.push_str(name);
        for (key, value) in attrs {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            self.output.push_str(&escape(value, true));
            self.output.push('"');
        }
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }
}

/// XML-escape `s`; quotes are only escaped inside attribute values
fn escape(s: &str, quoted: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if quoted => "&quot;",
            '\'' if quoted => "&apos;",
            _ => {
                out.push(c);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration() {
        let mut w = XmlWriter::new(IndentStyle::Tab);
        w.write_declaration();
        assert!(w.finish().starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_nesting_with_tabs() {
        let mut w = XmlWriter::new(IndentStyle::Tab);
        w.open("Product", &[("Name", "Foo")]);
        w.open("Directory", &[("Id", "TARGETDIR")]);
        w.empty("File", &[("Id", "a.txt")]);
        w.close("Directory");
        w.close("Product");

        assert_eq!(
            w.finish(),
            "<Product Name=\"Foo\">\n\t<Directory Id=\"TARGETDIR\">\n\t\t<File Id=\"a.txt\" />\n\t</Directory>\n</Product>\n"
        );
    }

    #[test]
    fn test_space_indentation() {
        let mut w = XmlWriter::new(IndentStyle::Spaces(2));
        w.open("Root", &[]);
        w.empty("Child", &[]);
        w.close("Root");
        assert!(w.finish().contains("\n  <Child />\n"));
    }

    #[test]
    fn test_text_element() {
        let mut w = XmlWriter::new(IndentStyle::Tab);
        w.text_element("Condition", &[("Message", "m")], "NOT A < B");
        assert_eq!(w.finish(), "<Condition Message=\"m\">NOT A &lt; B</Condition>\n");
    }

    #[test]
    fn test_close_at_zero() {
        let mut w = XmlWriter::new(IndentStyle::Tab);
        w.close("Root");
        assert_eq!(w.finish(), "</Root>\n");
    }

    #[test]
    fn test_escape_quoted() {
        assert_eq!(escape("a&b", true), "a&amp;b");
        assert_eq!(escape("a<b", true), "a&lt;b");
        assert_eq!(escape("a>b", true), "a&gt;b");
        assert_eq!(escape("a\"b", true), "a&quot;b");
        assert_eq!(escape("a'b", true), "a&apos;b");
    }

    #[test]
    fn test_escape_unquoted() {
        assert_eq!(escape("a&b", false), "a&amp;b");
        assert_eq!(escape("a\"b", false), "a\"b");
        assert_eq!(escape("it's <ok>", false), "it's &lt;ok&gt;");
    }
}
