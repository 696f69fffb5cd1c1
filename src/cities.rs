//! Fixed city-name-to-coordinates table.

/// Known cities. The first entry is the default used for unknown names.
pub const CITY_TABLE: &[(&str, (f64, f64))] = &[
    ("Moscow", (55.644466, 37.395744)),
    ("Saint Petersburg", (59.938955, 30.315644)),
    ("Novosibirsk", (55.030204, 82.920430)),
    ("Yekaterinburg", (56.838011, 60.597474)),
    ("Kazan", (55.796127, 49.106414)),
];

/// Resolves a city name to coordinates. Total: an unknown name falls back
/// to the default city instead of failing, so typos silently get the
/// default city's weather.
pub fn resolve(name: &str) -> (f64, f64) {
    let wanted = name.trim();
    CITY_TABLE
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(wanted))
        .map(|(_, coordinates)| *coordinates)
        .unwrap_or(CITY_TABLE[0].1)
}
