// Storefront - spdx.rs
// Copyright (C) 2025  Storefront contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Lookup of license identifiers as they appear in AppStream metadata.

const PROPRIETARY_PREFIX: &str = "LicenseRef-proprietary";
const FREE_SOFTWARE_URL: &str = "https://www.gnu.org/philosophy/free-sw.html";

/// Source of license information (URLs and SPDX normalization).
pub trait LicenseCatalog {
    /// URL describing `license`, if it is a known license.
    fn license_url(&self, license: &str) -> Option<String>;

    /// Converts a license expression into SPDX notation. Returns `None` if
    /// nothing in it is a known license.
    fn to_spdx_id(&self, license: &str) -> Option<String>;
}

/// Whether `license_id` resolves to a known license URL.
pub fn is_valid(license_id: &str) -> bool {
    is_valid_with(&SpdxCatalog, license_id)
}

/// URL describing `license_id`, or `None` for unknown licenses.
pub fn url(license_id: &str) -> Option<String> {
    url_with(&SpdxCatalog, license_id)
}

/// Display name for `license_id`. Unknown licenses are returned unchanged.
pub fn name(license_id: &str) -> String {
    name_with(&SpdxCatalog, license_id)
}

pub fn is_valid_with(catalog: &dyn LicenseCatalog, license_id: &str) -> bool {
    url_with(catalog, license_id).is_some()
}

pub fn url_with(catalog: &dyn LicenseCatalog, license_id: &str) -> Option<String> {
    if license_id.is_empty() {
        debug!("Unable to look up URL of empty license id");
        return None;
    }

    catalog.license_url(license_id)
}

pub fn name_with(catalog: &dyn LicenseCatalog, license_id: &str) -> String {
    if license_id.starts_with(PROPRIETARY_PREFIX) {
        return "Proprietary".into();
    }

    if license_id.is_empty() {
        debug!("Unable to look up name of empty license id");
        return String::new();
    }

    catalog
        .to_spdx_id(license_id)
        .unwrap_or_else(|| license_id.to_string())
}

/// Builtin catalog, following the rules AppStream applies to license
/// fields. Ids are checked against the complete SPDX license list.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpdxCatalog;

impl SpdxCatalog {
    /// Returns the SPDX license id `id` refers to, without a trailing `+`.
    /// Ids are case sensitive.
    pub fn canonical_id(id: &str) -> Option<&'static str> {
        let id = id.strip_prefix('@').unwrap_or(id);
        let id = id.strip_suffix('+').unwrap_or(id);
        ::spdx::license_id(id).map(|license| license.name)
    }

    fn convert_token(token: &str) -> Option<String> {
        if let Some((_, spdx)) = LEGACY_NAMES
            .iter()
            .find(|(legacy, _)| legacy.eq_ignore_ascii_case(token))
        {
            return Some((*spdx).to_string());
        }

        if token.starts_with("LicenseRef-") {
            return Some(token.to_string());
        }

        let (id, plus) = match token.strip_suffix('+') {
            Some(id) => (id, "+"),
            None => (token, ""),
        };
        Self::canonical_id(id).map(|canonical| format!("{canonical}{plus}"))
    }
}

impl LicenseCatalog for SpdxCatalog {
    fn license_url(&self, license: &str) -> Option<String> {
        if let Some(reference) = license.strip_prefix("LicenseRef-") {
            return match reference.split_once('=') {
                Some(("free", url)) | Some(("proprietary", url)) if !url.is_empty() => {
                    Some(url.to_string())
                }
                None if reference == "free" => Some(FREE_SOFTWARE_URL.to_string()),
                _ => None,
            };
        }

        let id = Self::canonical_id(license)?;
        Some(format!("https://spdx.org/licenses/{id}.html#page"))
    }

    fn to_spdx_id(&self, license: &str) -> Option<String> {
        let mut result: Vec<String> = Vec::new();
        let mut recognized = false;

        for (token, is_operator) in tokenize(license) {
            if is_operator {
                result.push(token);
                continue;
            }

            match Self::convert_token(&token) {
                Some(converted) => {
                    recognized = true;
                    result.push(converted);
                }
                None => result.push(token),
            }
        }

        if !recognized {
            return None;
        }

        Some(result.join(" ").replace("( ", "(").replace(" )", ")"))
    }
}

/// Splits a license expression into license tokens and operators.
/// Operators are normalized to their SPDX spelling.
fn tokenize(expression: &str) -> Vec<(String, bool)> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<(String, bool)>| {
        if current.is_empty() {
            return;
        }

        let word = std::mem::take(current);
        match word.to_ascii_lowercase().as_str() {
            "and" => tokens.push(("AND".to_string(), true)),
            "or" => tokens.push(("OR".to_string(), true)),
            "with" => tokens.push(("WITH".to_string(), true)),
            _ => tokens.push((word, false)),
        }
    };

    for c in expression.chars() {
        match c {
            ' ' | '\t' | '\n' => flush(&mut current, &mut tokens),
            '&' | ';' | ',' => {
                flush(&mut current, &mut tokens);
                tokens.push(("AND".to_string(), true));
            }
            '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(("OR".to_string(), true));
            }
            '(' | ')' => {
                flush(&mut current, &mut tokens);
                tokens.push((c.to_string(), true));
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);

    // Legacy names like "Public Domain" span two words
    let mut merged: Vec<(String, bool)> = Vec::with_capacity(tokens.len());
    for (token, is_operator) in tokens {
        if let Some((previous, false)) = merged.last() {
            if !is_operator {
                let joined = format!("{previous} {token}");
                if LEGACY_NAMES
                    .iter()
                    .any(|(legacy, _)| legacy.eq_ignore_ascii_case(&joined))
                {
                    merged.pop();
                    merged.push((joined, false));
                    continue;
                }
            }
        }
        merged.push((token, is_operator));
    }

    merged
}

const LEGACY_NAMES: &[(&str, &str)] = &[
    ("Apache", "Apache-2.0"),
    ("Apache2", "Apache-2.0"),
    ("Artistic", "Artistic-1.0"),
    ("BSD", "BSD-3-Clause"),
    ("GFDL", "GFDL-1.3"),
    ("GPL", "GPL-1.0+"),
    ("GPL+", "GPL-1.0+"),
    ("GPLv2", "GPL-2.0"),
    ("GPLv2+", "GPL-2.0+"),
    ("GPLv3", "GPL-3.0"),
    ("GPLv3+", "GPL-3.0+"),
    ("LGPL", "LGPL-2.0+"),
    ("LGPL+", "LGPL-2.0+"),
    ("LGPLv2", "LGPL-2.0"),
    ("LGPLv2+", "LGPL-2.0+"),
    ("LGPLv2.1", "LGPL-2.1"),
    ("LGPLv2.1+", "LGPL-2.1+"),
    ("LGPLv3", "LGPL-3.0"),
    ("LGPLv3+", "LGPL-3.0+"),
    ("AGPLv3", "AGPL-3.0"),
    ("AGPLv3+", "AGPL-3.0+"),
    ("MPLv1.1", "MPL-1.1"),
    ("MPLv2.0", "MPL-2.0"),
    ("MIT/X11", "MIT"),
    ("X11", "MIT"),
    ("Python", "Python-2.0"),
    ("zlib", "Zlib"),
    ("Public Domain", "LicenseRef-public-domain"),
];
