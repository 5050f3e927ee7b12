//! Shareable text for a lookup result.
//!
//! The message is the plain-text summary riders forward to each other:
//! a title line, the two resolved places, then one line per fare.

use crate::fares::RouteFares;

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "ERSeP – Tarifa Interurbano Córdoba";

/// Subject line for e-mail sharing.
pub const DEFAULT_SUBJECT: &str = "Tarifa Interurbano ERSeP";

/// Shown in place of fare lines when a route has none on record.
pub const NO_FARES: &str = "Sin tarifas registradas para este recorrido.";

/// Format a route as a share message.
///
/// Places are shown by their canonical names in upper case; each fare is
/// listed as `carrier – modality: $ amount`.
pub fn share_message(route: &RouteFares, title: &str) -> String {
    let origin = route.origin.name().unwrap_or(&route.origin.query);
    let destination = route
        .destination
        .name()
        .unwrap_or(&route.destination.query);

    let mut out = format!(
        "🚌 {title}\n📍 Origen: {}\n📍 Destino: {}\n",
        origin.to_uppercase(),
        destination.to_uppercase()
    );

    if route.fares.is_empty() {
        out.push_str(NO_FARES);
        out.push('\n');
    }
    for record in &route.fares {
        out.push_str(&format!(
            "🏢 {} – {}: {}\n",
            record.carrier, record.modality, record.fare
        ));
    }
    out
}

/// A WhatsApp "click to chat" link that pre-fills `message`.
pub fn whatsapp_link(message: &str) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(message))
}

/// A `mailto:` link with the given subject and body.
pub fn mailto_link(subject: &str, body: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fare, FareRecord, FareTable, Location};
    use crate::fares::lookup;
    use crate::matcher::MatchConfig;

    fn record(origin: &str, destination: &str, carrier: &str, modality: &str, cents: u64) -> FareRecord {
        FareRecord {
            origin: Location::new(origin),
            destination: Location::new(destination),
            carrier: carrier.into(),
            modality: modality.into(),
            fare: Fare::from_cents(cents),
            distance_km: None,
        }
    }

    fn route(origin: &str, destination: &str) -> RouteFares {
        let table = FareTable::new(vec![
            record("Córdoba", "Jesús María", "FONO BUS", "Común", 123_450),
            record("Córdoba", "Jesús María", "FONO BUS", "Diferencial", 150_000),
            record("Córdoba", "Cosquín", "LA CAPILLA", "Común", 215_000),
        ]);
        let corpus = table.corpus();
        lookup(origin, destination, &table, &corpus, &MatchConfig::default()).unwrap()
    }

    #[test]
    fn message_lists_every_fare() {
        let message = share_message(&route("jesus maria", "cordoba"), DEFAULT_TITLE);
        assert_eq!(
            message,
            "🚌 ERSeP – Tarifa Interurbano Córdoba\n\
             📍 Origen: JESÚS MARÍA\n\
             📍 Destino: CÓRDOBA\n\
             🏢 FONO BUS – Común: $ 1,234.50\n\
             🏢 FONO BUS – Diferencial: $ 1,500.00\n"
        );
    }

    #[test]
    fn message_for_empty_route() {
        let message = share_message(&route("jesus maria", "cosquin"), "Tarifas");
        assert!(message.starts_with("🚌 Tarifas\n"));
        assert!(message.ends_with(&format!("{NO_FARES}\n")));
    }

    #[test]
    fn whatsapp_link_encodes_message() {
        let link = whatsapp_link("📍 Origen: A & B\n");
        assert!(link.starts_with("https://wa.me/?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("%26"));
        assert!(link.ends_with("%0A"));
    }

    #[test]
    fn mailto_link_encodes_subject_and_body() {
        let link = mailto_link(DEFAULT_SUBJECT, "a b");
        assert_eq!(
            link,
            "mailto:?subject=Tarifa%20Interurbano%20ERSeP&body=a%20b"
        );
    }
}
