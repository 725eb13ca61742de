use crate::{
    config::model::{ReticleConfig, TextElement, TextType},
    foundation::error::{ReticleError, ReticleResult},
    text::format::{FormatArg, format_printf},
};

/// Host-supplied values for dynamic text that the engine cannot derive itself.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextContext {
    /// Current time in frames.
    pub frame: f64,
    pub show: String,
    pub shot: String,
    pub frame_start: String,
    pub frame_end: String,
    pub user: String,
    /// Full path of the open scene file.
    pub scene_file: String,
}

impl TextContext {
    /// Directory part of `scene_file`, including the trailing separator.
    pub fn scene_dir(&self) -> &str {
        match self.scene_file.rfind(['/', '\\']) {
            Some(i) => &self.scene_file[..=i],
            None => "",
        }
    }

    pub fn scene_name(&self) -> &str {
        match self.scene_file.rfind(['/', '\\']) {
            Some(i) => &self.scene_file[i + 1..],
            None => &self.scene_file,
        }
    }
}

fn template<'a>(text: &'a TextElement, default: &'a str) -> &'a str {
    if text.text.is_empty() {
        default
    } else {
        &text.text
    }
}

/// Produces the string a text element draws this frame.
///
/// `max_distance` is the layout's signed camera distance. Elements whose value is
/// unavailable (gate off, distance check off, bad aspect index) return an error and are
/// skipped by the caller.
pub fn resolve_text(
    text: &TextElement,
    config: &ReticleConfig,
    max_distance: f64,
    ctx: &TextContext,
) -> ReticleResult<String> {
    use FormatArg::{Float, Str};

    let out = match text.text_type {
        TextType::String => text.text.clone(),
        TextType::Lens => format_printf(
            template(text, "%1.2f mm"),
            &[Float(config.camera.focal_length)],
        ),
        TextType::Camera => {
            if text.text.is_empty() {
                config.camera.name.clone()
            } else {
                format_printf(&text.text, &[Str(&config.camera.name)])
            }
        }
        TextType::Frame => format_printf(template(text, "%04.0f"), &[Float(ctx.frame)]),
        TextType::AspectRatio => {
            let len = config.aspect_ratios.len();
            let entry = usize::try_from(text.ar_level)
                .ok()
                .and_then(|i| config.aspect_ratios.get(i))
                .ok_or_else(|| {
                    ReticleError::index_out_of_range("aspect ratio", i64::from(text.ar_level), len)
                })?;
            format_printf(template(text, "%1.3f"), &[Float(entry.ratio)])
        }
        TextType::MaxDistance => {
            if config.options.maximum_distance <= 0.0 {
                return Err(ReticleError::undisplayed("maximum distance check is off"));
            }
            format_printf(template(text, "max. dist %1.0f"), &[Float(max_distance)])
        }
        TextType::ProjectionGate => {
            let gate = &config.projection_gate;
            if !gate.display.is_displayed() {
                return Err(ReticleError::undisplayed("projection gate is not displayed"));
            }
            if gate.vertical == 0.0 {
                return Err(ReticleError::invalid_config("projection gate height is zero"));
            }
            format_printf(
                template(text, "%1.3f"),
                &[Float(gate.horizontal / gate.vertical)],
            )
        }
        TextType::Show => format_printf(template(text, "%s"), &[Str(&ctx.show)]),
        TextType::Shot => format_printf(template(text, "%s"), &[Str(&ctx.shot)]),
        TextType::ShowShot => format_printf(
            template(text, "%s/%s"),
            &[Str(&ctx.show), Str(&ctx.shot)],
        ),
        TextType::FrameStart => format_printf(template(text, "%s"), &[Str(&ctx.frame_start)]),
        TextType::FrameEnd => format_printf(template(text, "%s"), &[Str(&ctx.frame_end)]),
        TextType::FrameRange => format_printf(
            template(text, "%s-%s"),
            &[Str(&ctx.frame_start), Str(&ctx.frame_end)],
        ),
        TextType::User => format_printf(template(text, "%s"), &[Str(&ctx.user)]),
        TextType::CurrentFile => format_printf(template(text, "%s"), &[Str(&ctx.scene_file)]),
        TextType::FilePath => format_printf(template(text, "%s"), &[Str(ctx.scene_dir())]),
        TextType::FileName => format_printf(template(text, "%s"), &[Str(ctx.scene_name())]),
        TextType::PanScanRatio => format_printf(
            template(text, "%1.2f"),
            &[Float(config.pan_scan.pan_scan_ratio)],
        ),
        TextType::PanScanOffset => format_printf(
            template(text, "%1.2f"),
            &[Float(config.pan_scan.pan_scan_offset)],
        ),
        TextType::SafeAction => template(text, "safe action").to_owned(),
        TextType::SafeTitle => template(text, "safe title").to_owned(),
    };
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/text/dynamic.rs"]
mod tests;
