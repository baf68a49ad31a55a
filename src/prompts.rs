pub const ANALYZE_INTRO: &str = include_str!("../data/prompts/analyze_intro.txt");
pub const ANALYZE_IMAGE: &str = include_str!("../data/prompts/analyze_image.txt");
pub const ANALYZE_REFERENCE: &str = include_str!("../data/prompts/analyze_reference.txt");
pub const GENERATE_AD: &str = include_str!("../data/prompts/generate_ad.txt");
pub const GENERATE_IMAGE_GUIDANCE: &str =
    include_str!("../data/prompts/generate_image_guidance.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single left-to-right pass: placeholder-looking text
/// inside a substituted value is emitted verbatim. Unknown placeholders are
/// left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}
