//! Hand-off to the packaging stage.
//!
//! A [`PassBundle`] holds every payload that goes into the archive, keyed by
//! archive path. Signing, manifest hashing, and zipping happen downstream.

use std::collections::BTreeMap;

use pkpass_core::PassError;

use crate::request::PassRequest;

/// Archive payloads for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassBundle {
    /// Serialized `pass.json`.
    pub pass_json: Vec<u8>,
    /// Image filename (e.g. `icon@2x.png`) to bytes.
    pub images: BTreeMap<String, Vec<u8>>,
    /// `<lang>.lproj/pass.strings` path to UTF-8 file body.
    pub localizations: BTreeMap<String, String>,
}

impl PassBundle {
    /// Every archive entry, `pass.json` first, then images, then strings.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[u8])> {
        std::iter::once(("pass.json", self.pass_json.as_slice()))
            .chain(self.images.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
            .chain(
                self.localizations
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_bytes())),
            )
    }
}

impl PassRequest {
    /// Serialize once and collect the archive payloads.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`PassRequest::write`].
    pub fn bundle(&self) -> Result<PassBundle, PassError> {
        let pass_json = self.to_json_vec()?;
        let images = self
            .images()
            .iter()
            .map(|(role, bytes)| (role.filename().to_string(), bytes.clone()))
            .collect();
        let localizations = self
            .localizations()
            .languages()
            .filter_map(|lang| {
                self.localizations()
                    .render_strings(lang)
                    .map(|body| (format!("{lang}.lproj/pass.strings"), body))
            })
            .collect();
        tracing::debug!(
            images = self.images().len(),
            bytes = pass_json.len(),
            "assembled pass bundle"
        );
        Ok(PassBundle {
            pass_json,
            images,
            localizations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkpass_core::PassImage;

    #[test]
    fn bundle_collects_all_payloads() {
        let mut request = PassRequest::default();
        request.serial_number = "42".into();
        request.add_image(PassImage::Icon, vec![0x89, 0x50]);
        request.add_image(PassImage::Logo2x, vec![1, 2, 3]);
        request.add_localization("en", "gate", "Gate");
        request.add_localization("fr", "gate", "Porte");

        let bundle = request.bundle().unwrap();
        assert_eq!(bundle.pass_json, request.to_json_vec().unwrap());
        assert_eq!(bundle.images.get("icon.png"), Some(&vec![0x89, 0x50]));
        assert!(bundle.images.contains_key("logo@2x.png"));
        assert_eq!(
            bundle.localizations.get("fr.lproj/pass.strings").map(String::as_str),
            Some("\"gate\" = \"Porte\";\n")
        );

        let names: Vec<&str> = bundle.entries().map(|(name, _)| name).collect();
        assert_eq!(names[0], "pass.json");
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn bundle_propagates_write_errors() {
        let mut request = PassRequest::default();
        request.label_color = Some("#1".into());
        assert!(request.bundle().is_err());
    }
}
