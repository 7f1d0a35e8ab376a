use serde::Serialize;

/// A waste-service company shown under the collection services menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub website: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
    /// Asset name the shell resolves to a bundled logo.
    pub logo: &'static str,
}

pub const COMPANIES: &[Company] = &[
    Company {
        id: "kemis",
        name: "KEMIS-Termoclean d.o.o.",
        description: "Tvrtka s iskustvom u gospodarenju opasnim i neopasnim otpadom. Ima skladište u Novom Vinodolskom i nudi zbrinjavanje otpada poput industrijskih uljeva, onečišćenog tla, otpadnih ulja i masti.",
        website: "https://kemis-termoclean.hr/",
        phone: "051-256-123",
        email: "kemis@gmail.com",
        logo: "kemis.jpg",
    },
    Company {
        id: "metis",
        name: "METIS d.d",
        description: "Tvrtka specijalizirana za upravljanje otpadom, uključujući recikliranje i odlaganje industrijskog otpada.",
        website: "https://metis.hr/",
        phone: "051-123-456",
        email: "metis@gmail.com",
        logo: "metis.jpg",
    },
];

#[must_use]
pub fn find_company(id: &str) -> Option<&'static Company> {
    COMPANIES.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_company() {
        assert_eq!(find_company("metis").map(|c| c.name), Some("METIS d.d"));
        assert!(find_company("").is_none());
        assert!(find_company("unknown").is_none());
    }

    #[test]
    fn test_company_websites_parse() {
        for company in COMPANIES {
            assert!(
                crate::capabilities::parse_link(company.website).is_ok(),
                "{}",
                company.id
            );
        }
    }
}
