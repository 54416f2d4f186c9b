#![allow(dead_code)]

use nested_core::{Edge, Faction, Info, Pathgrid, Point, Reaction, Region, SoundRef};

pub fn pathgrid(points: &[(i32, i32, i32)], edges: &[(i32, i32)]) -> Pathgrid {
    let mut grid = Pathgrid::new("Seyda Neen");
    grid.points = points.iter().map(|&(x, y, z)| Point::new(x, y, z)).collect();
    grid.edges = edges.iter().map(|&(a, b)| Edge::new(a, b)).collect();
    grid.data.point_count = grid.points.len() as i16;
    grid
}

pub fn faction(reactions: &[(&str, i32)]) -> Faction {
    let mut faction = Faction::new("Mages Guild", "Mages Guild");
    faction.reactions = reactions
        .iter()
        .map(|&(k, v)| Reaction::new(k, v))
        .collect();
    faction
}

pub fn region(sounds: &[(&str, u8)]) -> Region {
    let mut region = Region::new("bitter coast region", "Bitter Coast");
    region.sounds = sounds.iter().map(|&(s, c)| SoundRef::new(s, c)).collect();
    region
}

pub fn info(script: &str) -> Info {
    let mut info = Info::new("2316916191253412318", "latest rumors");
    info.response = "I've heard nothing of interest.".to_string();
    info.result_script = script.to_string();
    info
}
