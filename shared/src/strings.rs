//! User-facing copy. Titles and messages match what the deployed app shows.

pub const ERROR_TITLE: &str = "Error";
pub const ERROR_TITLE_HR: &str = "Greška";

pub const EVENT_NOT_FOUND: &str = "Event not found.";
pub const EVENT_FETCH_FAILED: &str = "Unable to fetch event.";
pub const EVENTS_FETCH_FAILED: &str = "Ne mogu dohvatiti događaje.";
pub const MAPS_OPEN_FAILED: &str = "Unable to open Google Maps.";

pub const ADDRESSES_FETCH_FAILED: &str = "Ne mogu dohvatiti adrese.";
pub const ADDRESS_NOT_FOUND: &str = "No such document!";
pub const ADDRESS_UPDATE_FAILED: &str = "Ne mogu izbrisati adresu.";
pub const NO_ADDRESSES: &str = "Nema još dodanit adresa";
pub const NO_ADDRESSES_HINT: &str = "Unesite adresu kako biste saznali o danu odvoza ai više.";
pub const THIS_WEEK_PREFIX: &str = "Ovaj tjedan: ";

pub const ADVICE_FETCH_FAILED: &str = "Ne mogu dohvatiti savjete.";
pub const ADVICE_EXAMPLES_FETCH_FAILED: &str = "Ne mogu dohvatiti dokumente subkolekcije.";
pub const ADVICE_NOT_FOUND: &str = "Document not found!";
pub const ADVICE_FETCH_DOC_FAILED: &str = "Failed to fetch the document.";
pub const NO_EXAMPLES: &str = "Trenutno nema primjera!";
pub const NO_ADVICE_DETAILS: &str = "Trenutno nema detaljnog opisa!";
pub const UNTITLED: &str = "No Title";

pub const FIELDS_REQUIRED: &str = "Sva polja su obavezna.";
pub const SAVE_FAILED: &str = "Došlo je do greške prilikom spremanja podataka.";
pub const REGISTRATION_OK_TITLE: &str = "Prijava uspješna!";
pub const REGISTRATION_OK_MESSAGE: &str = "Vaši podaci su spremljeni.";
pub const REPORT_OK_TITLE: &str = "Prijava zaprimljena";
pub const REPORT_OK_MESSAGE: &str = "Hvala na prijavi.";

pub const NO_COMPANY: &str = "Trenutno nema ni jedna dostupna kompanija!";
pub const URL_UNSUPPORTED_PREFIX: &str = "URL nije podržan: ";
pub const LINK_OPEN_FAILED_PREFIX: &str = "Ne mogu otvoriti link: ";

pub const COLLECTION_INFO_TITLE: &str = "Kalendar odvoza";
pub const COLLECTION_INFO_TEXT: &str =
    "Na dan pražnjenja kanta se postavlja uz rub javne površine tako da ne ometa promet.";
