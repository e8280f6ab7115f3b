/// Conjunctions, postpositions, pronouns and question particles.
pub const STOP_WORDS: &[&str] = &[
    "және", "мен", "бен", "пен", "да", "де", "та", "те", "бірақ", "алайда", "немесе", "әлде",
    "не", "ал", "егер", "өйткені", "себебі", "сондықтан", "үшін", "туралы", "бойынша",
    "арқылы", "дейін", "кейін", "соң", "қарай", "сияқты", "бұл", "осы", "сол", "ол", "олар",
    "біз", "сіз", "сен", "мұнда", "онда", "мына", "ана", "әр", "барлық", "бар", "жоқ", "емес",
    "ма", "ме", "ба", "бе", "па", "пе", "ғой", "ғана", "қана", "тек", "тағы", "әлі", "енді",
];
