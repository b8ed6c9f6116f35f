/// The markup of one `{{ ... }}` output tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputTag<'a> {
    pub markup: &'a str,
    /// Byte offset of `markup` within the source.
    pub offset: usize,
}

/// Collect every output tag in `source`, in order.
///
/// Whitespace-control dashes (`{{-`, `-}}`) are not part of the markup. An
/// unterminated `{{` ends the scan.
pub fn output_tags(source: &str) -> Vec<OutputTag<'_>> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(open) = source[pos..].find("{{") {
        let mut start = pos + open + 2;
        let Some(close) = source[start..].find("}}") else {
            break;
        };
        let mut end = start + close;
        pos = end + 2;

        if source[start..end].starts_with('-') {
            start += 1;
        }
        if end > start && source[start..end].ends_with('-') {
            end -= 1;
        }

        tags.push(OutputTag {
            markup: &source[start..end],
            offset: start,
        });
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markups(source: &str) -> Vec<&str> {
        output_tags(source).into_iter().map(|tag| tag.markup).collect()
    }

    mod tags {
        use super::*;

        #[test]
        fn finds_tags_in_order() {
            let source = "<p>{{ user.name }}</p>{{ 'x' | upcase }}";
            assert_eq!(
                output_tags(source),
                vec![
                    OutputTag { markup: " user.name ", offset: 5 },
                    OutputTag { markup: " 'x' | upcase ", offset: 24 },
                ]
            );
        }

        #[test]
        fn whitespace_control_dashes_are_dropped() {
            let source = "{{- name -}}";
            let tags = output_tags(source);
            assert_eq!(tags[0].markup, " name ");
            assert_eq!(tags[0].offset, 3);
        }

        #[test]
        fn lone_dash() {
            assert_eq!(markups("{{-}}"), vec![""]);
            assert_eq!(markups("{{}}"), vec![""]);
        }

        #[test]
        fn unterminated_tag_stops_scan() {
            assert_eq!(markups("{{ a }} {{ b"), vec![" a "]);
        }

        #[test]
        fn block_tags_are_ignored() {
            assert_eq!(markups("{% if a %}{{ b }}{% endif %}"), vec![" b "]);
        }
    }
}
