//! Hardcoded supplemental show detail, keyed by event slug.
//!
//! The editorial copy (venue, poster, description, creators, gallery)
//! for the repertoire shows is maintained here rather than in the
//! persisted document; the normalization pipeline merges it in by id.

/// Poster used when neither the record nor the catalog carries an image.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1521572267360-ee0c2909d518?auto=format&fit=crop&w=1200&q=80";

/// A credit line on a show.
#[derive(Debug, Clone, Copy)]
pub struct Credit {
    pub role: &'static str,
    pub name: &'static str,
}

/// A captioned gallery shot.
#[derive(Debug, Clone, Copy)]
pub struct GalleryShot {
    pub src: &'static str,
    pub caption: &'static str,
}

/// Editorial detail for one show.
#[derive(Debug, Clone, Copy)]
pub struct Supplemental {
    pub title: &'static str,
    pub venue: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub creators: &'static [Credit],
    pub gallery: &'static [GalleryShot],
}

/// Look up the catalog entry for an event slug.
pub fn supplemental(id: &str) -> Option<&'static Supplemental> {
    match id {
        "marat" => Some(&MARAT),
        "okna" => Some(&OKNA),
        "ostrov" => Some(&OSTROV),
        _ => None,
    }
}

static MARAT: Supplemental = Supplemental {
    title: "Мой бедный Марат",
    venue: "Москва · Сцена AmmA Production",
    image: "https://images.unsplash.com/photo-1521737604893-d14cc237f11d?auto=format&fit=crop&w=1200&q=80",
    description: "Легендарная история Алексея Арбузова о трёх молодых людях, чья дружба и любовь взрослеют на фоне осаждённого города.",
    creators: &[
        Credit { role: "Режиссёр", name: "Вера Анненкова" },
        Credit { role: "Продюсер", name: "Михаил Маликов" },
        Credit { role: "Исполнители", name: "Алина Мазненкова, Максим Дементьев" },
        Credit { role: "Художник по свету", name: "Аксинья Олейник" },
    ],
    gallery: &[
        GalleryShot {
            src: "https://images.unsplash.com/photo-1521572267360-ee0c2909d518?auto=format&fit=crop&w=900&q=80",
            caption: "Погружение в атмосферу блокадного города",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1515169067865-5387ec356754?auto=format&fit=crop&w=900&q=80",
            caption: "Диалог героев на тёмной сцене",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1478720568477-152d9b164e26?auto=format&fit=crop&w=900&q=80",
            caption: "Финальный световой акцент спектакля",
        },
    ],
};

static OKNA: Supplemental = Supplemental {
    title: "Окна. Город. Любовь...",
    venue: "Москва · Арт-пространство «Окна»",
    image: "https://images.unsplash.com/photo-1514525253161-7a46d19cd819?auto=format&fit=crop&w=1200&q=80",
    description: "Поэтический спектакль о городских историях, где пластика, видеоарт и музыка превращают каждое окно в отдельную историю любви.",
    creators: &[
        Credit { role: "Художественный руководитель", name: "Вера Анненкова" },
        Credit { role: "Продюсер", name: "Михаил Маликов" },
        Credit { role: "Видеохудожник", name: "Аксинья Олейник" },
        Credit { role: "Исполнители", name: "Алина Мазненкова, Максим Дементьев" },
    ],
    gallery: &[
        GalleryShot {
            src: "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=900&q=80",
            caption: "Городской ритм спектакля",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1489515217757-5fd1be406fef?auto=format&fit=crop&w=900&q=80",
            caption: "Сцена у панорамных окон",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1508214751196-bcfd4ca60f91?auto=format&fit=crop&w=900&q=80",
            caption: "Пластический дуэт в свете города",
        },
    ],
};

static OSTROV: Supplemental = Supplemental {
    title: "Остров",
    venue: "Санкт-Петербург · Лофт «Остров»",
    image: "https://images.unsplash.com/photo-1485563845929-11d0e5e56b1f?auto=format&fit=crop&w=1200&q=80",
    description: "Современная притча о поиске себя и необходимости одиночества, где звук, свет и пластика создают собственную вселенную.",
    creators: &[
        Credit { role: "Режиссёр", name: "Вера Анненкова" },
        Credit { role: "Музыкальный продюсер", name: "Михаил Маликов" },
        Credit { role: "Исполнители", name: "Алина Мазненкова, Максим Дементьев" },
        Credit { role: "Художник по свету", name: "Аксинья Олейник" },
    ],
    gallery: &[
        GalleryShot {
            src: "https://images.unsplash.com/photo-1500375592092-40eb2168fd21?auto=format&fit=crop&w=900&q=80",
            caption: "Герои на краю острова",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1462212210333-335063b676d3?auto=format&fit=crop&w=900&q=80",
            caption: "Мистическое пространство спектакля",
        },
        GalleryShot {
            src: "https://images.unsplash.com/photo-1523906834658-6e24ef2386f9?auto=format&fit=crop&w=900&q=80",
            caption: "Музыкальный эпизод у моря",
        },
    ],
};
