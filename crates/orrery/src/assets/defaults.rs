//! Built-in solar system: the sun, eight planets and their panel content.

use std::collections::HashMap;

use crate::assets::manifest::{BodyContent, SystemManifest};
use crate::components::body::{
    BodyDescriptor, CentralBodyDescriptor, Direction, OrbitDesc, RingDesc, SpinDesc,
};
use crate::components::color::Rgb;

use Direction::{Clockwise, Counterclockwise};

struct Planet {
    label: &'static str,
    orbit_speed: f32,
    orbit_radius: f32,
    orbit_color: u32,
    size: f32,
    tilt_degrees: f32,
    spin_speed: f32,
    spin_direction: Direction,
    rim: Option<u32>,
    ring: Option<(f32, &'static str)>,
}

const PLANETS: [Planet; 8] = [
    Planet {
        label: "mercury", orbit_speed: 0.00048, orbit_radius: 10.0, orbit_color: 0xa875bd,
        size: 0.2, tilt_degrees: 0.0, spin_speed: 0.005, spin_direction: Counterclockwise,
        rim: Some(0xf9cf9f), ring: None,
    },
    Planet {
        label: "venus", orbit_speed: 0.00035, orbit_radius: 13.0, orbit_color: 0xdb981a,
        size: 0.5, tilt_degrees: 0.0, spin_speed: 0.0005, spin_direction: Clockwise,
        rim: Some(0xb66f1f), ring: None,
    },
    Planet {
        label: "earth", orbit_speed: 0.00029, orbit_radius: 16.0, orbit_color: 0x2bb3ed,
        size: 0.5, tilt_degrees: -23.4, spin_speed: 0.01, spin_direction: Counterclockwise,
        rim: None, ring: None,
    },
    Planet {
        label: "mars", orbit_speed: 0.00024, orbit_radius: 19.0, orbit_color: 0xeb690c,
        size: 0.3, tilt_degrees: 0.0, spin_speed: 0.01, spin_direction: Counterclockwise,
        rim: Some(0xbc6434), ring: None,
    },
    Planet {
        label: "jupiter", orbit_speed: 0.00013, orbit_radius: 22.0, orbit_color: 0xffb580,
        size: 1.0, tilt_degrees: 0.0, spin_speed: 0.06, spin_direction: Counterclockwise,
        rim: Some(0xf3d6b6), ring: None,
    },
    Planet {
        label: "saturn", orbit_speed: 0.0001, orbit_radius: 25.0, orbit_color: 0xc9c230,
        size: 0.8, tilt_degrees: 0.0, spin_speed: 0.05, spin_direction: Counterclockwise,
        rim: Some(0xd6b892), ring: Some((0.5, "/assets/map/saturnringmap.png")),
    },
    Planet {
        label: "uranus", orbit_speed: 0.00007, orbit_radius: 28.0, orbit_color: 0x30fcda,
        size: 0.5, tilt_degrees: 0.0, spin_speed: 0.02, spin_direction: Clockwise,
        rim: Some(0x9ab6c2), ring: Some((0.4, "/assets/map/uranusringmap.png")),
    },
    Planet {
        label: "neptune", orbit_speed: 0.000054, orbit_radius: 31.0, orbit_color: 0x6b89ff,
        size: 0.5, tilt_degrees: 0.0, spin_speed: 0.02, spin_direction: Counterclockwise,
        rim: Some(0x5c7ed7), ring: None,
    },
];

const CONTENT: [(&str, &str, &str); 9] = [
    (
        "sun",
        "The Sun",
        "The Sun is the heart of our solar system, a massive star made of hot plasma that provides the light and warmth necessary for life on Earth. It contains about 99.8% of the solar system's total mass, holding planets, moons, asteroids, and comets in its gravitational grip.",
    ),
    (
        "mercury",
        "Mercury",
        "Mercury is the smallest and closest planet to the Sun. Its proximity results in extreme temperature changes, from scorching days to freezing nights. With no significant atmosphere, Mercury's surface is heavily cratered, resembling our Moon.",
    ),
    (
        "venus",
        "Venus",
        "Venus is often called Earth's 'sister planet' due to its similar size and composition. However, its thick, toxic atmosphere traps heat, making Venus the hottest planet. Its surface is hidden under thick clouds, and its rotation is unique as it spins backward.",
    ),
    (
        "earth",
        "Earth",
        "Earth is the only known planet to support life, thanks to its ideal climate, liquid water, and protective atmosphere. With diverse ecosystems, land, and oceans, Earth\u{2019}s unique conditions allow countless species to thrive.",
    ),
    (
        "mars",
        "Mars",
        "Mars, known as the 'Red Planet' for its rusty surface, has been a focus of exploration due to its potential to support life. It has the largest volcano and canyon in the solar system and shows evidence of past water flows, sparking interest in its habitability.",
    ),
    (
        "jupiter",
        "Jupiter",
        "Jupiter is the largest planet, a gas giant with swirling storms, including the famous Great Red Spot. It has more than 75 moons, and its massive magnetic field is the strongest in the solar system. Jupiter\u{2019}s size and composition are more similar to a small star than a planet.",
    ),
    (
        "saturn",
        "Saturn",
        "Saturn is known for its stunning rings, made of ice and rock. As a gas giant, it\u{2019}s the second-largest planet and has over 80 moons. Saturn's rings and majestic appearance make it a striking feature in the solar system.",
    ),
    (
        "uranus",
        "Uranus",
        "Uranus is unique for its tilted axis, essentially rolling around the Sun. This icy giant has a blue-green color due to methane in its atmosphere and is mostly made of water, ammonia, and methane ices. It has a faint ring system and numerous moons.",
    ),
    (
        "neptune",
        "Neptune",
        "Neptune, the farthest planet from the Sun, is a cold, dark world with supersonic winds. This ice giant is similar to Uranus in composition, featuring a striking deep blue color and a set of faint rings. Neptune\u{2019}s largest moon, Triton, is one of the coldest objects in the solar system.",
    ),
];

/// The central star.
pub fn sun() -> CentralBodyDescriptor {
    CentralBodyDescriptor {
        label: "sun".to_string(),
        size: 5.0,
        spin: SpinDesc {
            angle: 0.0,
            speed: 0.002,
            direction: Counterclockwise,
        },
        surface_texture: "/assets/map/sunmap.jpg".to_string(),
        rim_color: Rgb::from_hex(0xffff99),
        shadow_color: Rgb::BLACK,
    }
}

/// The eight planets, innermost first.
pub fn planets() -> Vec<BodyDescriptor> {
    PLANETS.iter().map(planet_descriptor).collect()
}

fn planet_descriptor(p: &Planet) -> BodyDescriptor {
    let mut d = BodyDescriptor::new(p.label);
    d.orbit = OrbitDesc {
        speed: p.orbit_speed,
        radius: p.orbit_radius,
        direction: Clockwise,
        color: Rgb::from_hex(p.orbit_color),
    };
    d.spin = SpinDesc {
        angle: p.tilt_degrees.to_radians(),
        speed: p.spin_speed,
        direction: p.spin_direction,
    };
    d.size = p.size;
    d.surface_texture = format!("/assets/map/{}map.jpg", p.label);
    if let Some(rim) = p.rim {
        d.rim_color = Rgb::from_hex(rim);
    }
    d.ring = p.ring.map(|(size, texture)| RingDesc {
        inner_offset: 0.1,
        size,
        texture: texture.to_string(),
    });
    d
}

/// Panel content for the sun and every planet.
pub fn content() -> HashMap<String, BodyContent> {
    CONTENT
        .iter()
        .map(|(label, title, desc)| (label.to_string(), BodyContent::new(*title, *desc)))
        .collect()
}

/// The complete built-in system.
pub fn solar_system() -> SystemManifest {
    SystemManifest {
        central: Some(sun()),
        bodies: planets(),
        content: content(),
    }
}
