// Storefront - i18n.rs
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

use gettextrs::gettext;

// Replaces every "{}" with the next argument
fn freplace(input: String, args: &[&str]) -> String {
    let mut parts = input.split("{}");
    let mut output = parts.next().unwrap_or_default().to_string();
    for (part, arg) in parts.zip(args.iter()) {
        output += arg;
        output += part;
    }
    output
}

pub fn i18n(format: &str) -> String {
    gettext(format)
}

pub fn i18n_f(format: &str, args: &[&str]) -> String {
    let s = gettext(format);
    freplace(s, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_get_replaced_in_order() {
        assert_eq!(
            freplace("{} of {}".into(), &["1", "2"]),
            "1 of 2".to_string()
        );
        assert_eq!(freplace("no args".into(), &[]), "no args".to_string());
    }
}
