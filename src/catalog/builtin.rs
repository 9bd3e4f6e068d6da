//! Built-in catalog partitions.
//!
//! Adding a country means adding one `ScopeDef` here; nothing else changes.

use super::ScopeDef;

/// Scope definitions shipped with the crate.
pub(super) fn scope_defs() -> Vec<ScopeDef> {
    vec![argentina(), brazil(), poland()]
}

fn argentina() -> ScopeDef {
    ScopeDef::new(
        "ar",
        2032,
        "es",
        "Argentina",
        &[
            "Betano",
            "Bet365",
            "Codere",
            "Betsson",
            "bplay",
            "BetWarrior",
            "Jugadón",
            "City Center Online",
            "Casino Magic Online",
            "Casino Buenos Aires Online",
            "Palermo Online",
            "Casino de Córdoba Online",
            "Casino de Mendoza Online",
            "Casino Santa Fe Online",
            "Betcris",
            "Rivalo",
            "Betway",
            "Betfair",
            "Pinnacle",
            "Marathonbet",
            "1xBet",
            "1win",
            "22Bet",
            "20Bet",
            "TonyBet",
            "LeoVegas",
            "Unibet",
            "William Hill",
            "Betfred",
            "Bwin",
            "888sport",
            "888casino",
            "Bodog",
            "Stake",
            "BC.GAME",
            "Mostbet",
            "Melbet",
            "Parimatch",
            "10bet",
            "BetVictor",
            "Vulkan Vegas",
            "1xSlots",
            "Wazamba",
            "Casumo",
            "NetBet",
            "LV BET",
            "Novibet",
            "Betmotion",
            "Mr Green",
            "Royal Panda",
            "Tipico",
            "ComeOn",
            "Coral",
            "Ladbrokes",
            "Paddy Power",
            "PokerStars Sports",
            "BetMGM",
            "DraftKings",
            "FanDuel",
            "888poker",
            "GGPoker",
            "Winamax",
            "JackpotCity",
            "EnergyCasino",
            "PlayOJO",
            "Hipódromo Argentino de Palermo",
            "Casino Trilenium",
            "Casino Puerto Madero",
            "Boldt Gaming",
            "Lotería de la Ciudad (BA CABA Online)",
            "Dafabet",
            "Sportsbet.io",
            "Cloudbet",
            "Blaze",
            "Betano Argentina",
        ],
    )
    .with_aliases(&[("LV BET", &["LVBET", "lvbet", "LVBet"])])
}

fn brazil() -> ScopeDef {
    ScopeDef::new(
        "br",
        2076,
        "pt",
        "Brazil",
        &[
            "Betano",
            "bet365",
            "Sportingbet",
            "PixBet",
            "Betnacional",
            "Superbet",
            "Betfair",
            "Galera.bet",
            "EstrelaBet",
            "KTO",
            "Brazino777",
            "BetMGM",
            "Bet7k",
            "Vaidebet",
            "BetPix365",
            "Esportes da Sorte",
            "Casa de Apostas",
            "Rivalo",
            "Pinnacle",
            "Betway",
            "Betboo",
            "Novibet",
            "Bodog",
            "Betmotion",
            "Dafabet",
            "Bettilt",
            "Betwinner",
            "22Bet",
            "Parimatch",
            "LeoVegas",
            "Betsafe",
            "PokerStars",
            "Marathonbet",
            "BetVictor",
            "888casino",
            "TonyBet",
            "Betfred",
            "betwarrior",
            "BR4Bet",
            "Aposta Ganha",
            "Bateu Bet",
            "Luck.bet",
            "JonBet",
            "Reals",
            "B1 Bet",
            "BetBoom",
            "Matchbook",
            "Bolsa de Aposta",
            "7Games",
            "GingaBet",
            "VivaSorte",
            "Sorte Online",
            "LottoLand",
            "BetEsporte",
            "SupremaBet",
            "MrJackBet",
            "F12Bet",
            "PagBet",
            "NacionalBet",
            "BrasilBet",
            "PIN",
            "Rei do Pitaco",
            "Cartola FC",
            "Sorare",
            "BacanaPlay",
            "PlayUzu",
            "Cassino",
            "Blaze",
            "Stake",
            "Pin-Up",
            "1win",
            "1xBet",
            "Mostbet",
            "Melbet",
            "Betano Casino",
            "KTO Casino",
        ],
    )
    .with_aliases(&[
        ("Galera.bet", &["GaleraBet", "galera.bet", "galerabet"]),
        ("Casa de Apostas", &["CasadeApostas", "casa de apostas", "casadeapostas"]),
        ("Esportes da Sorte", &["esportes da sorte", "Esporte365", "Esporte 365"]),
    ])
}

fn poland() -> ScopeDef {
    ScopeDef::new(
        "pl",
        2616,
        "pl",
        "Poland",
        &[
            "Superbet",
            "Betclic",
            "STS",
            "Fortuna",
            "Betfan",
            "LV BET",
            "forBET",
            "TOTALbet",
            "eWinner",
            "ETOTO",
            "PZBuk",
            "Fuksiarz",
            "Betcris",
            "Betters",
            "GO+bet",
            "AdmiralBet",
            "Lebull",
            "ComeOn",
            "Traf",
            "Noblebet",
            "BetX",
            "Totolotek",
            "Total Casino",
            "Casinos Poland",
            "Hit Casino",
            "LOTTO",
            "Totalizator Sportowy",
        ],
    )
    .with_aliases(&[
        ("LV BET", &["LVBET", "lvbet", "LVBet"]),
        ("GO+bet", &["GO BET", "GoBet", "gobet", "GO+BET", "go+bet"]),
        ("Total Casino", &["TotalCasino", "totalcasino"]),
        ("Casinos Poland", &["Casino Poland", "casinospoland"]),
        ("Hit Casino", &["HitCasino", "hitcasino"]),
        ("LOTTO", &["lotto"]),
    ])
}
