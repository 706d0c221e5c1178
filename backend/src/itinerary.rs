//! Static Camino Francés itinerary: one destination per walking day plus the
//! villages and landmarks passed along the way.

use once_cell::sync::Lazy;

use crate::models::{Coordinate, Destination, LocationPoint, RouteDetail};

struct StageRecord {
    name: &'static str,
    lat: f64,
    lon: f64,
    day_km: f64,
    lodging: &'static str,
    description: &'static str,
}

struct WaypointRecord {
    name: &'static str,
    coordinate: Option<Coordinate>,
    km_from_start: f64,
    details: Option<&'static str>,
}

const fn stage(
    name: &'static str,
    lat: f64,
    lon: f64,
    day_km: f64,
    lodging: &'static str,
    description: &'static str,
) -> StageRecord {
    StageRecord {
        name,
        lat,
        lon,
        day_km,
        lodging,
        description,
    }
}

const fn village(name: &'static str, lat: f64, lon: f64, km: f64, details: &'static str) -> WaypointRecord {
    WaypointRecord {
        name,
        coordinate: Some(Coordinate::new(lat, lon)),
        km_from_start: km,
        details: Some(details),
    }
}

/// Named landmark without a surveyed position.
const fn landmark(name: &'static str, km: f64) -> WaypointRecord {
    WaypointRecord {
        name,
        coordinate: None,
        km_from_start: km,
        details: None,
    }
}

const DEPARTURE: StageRecord = stage(
    "Saint-Jean-Pied-de-Port",
    43.1631,
    -1.2361,
    0.0,
    "Hôtel Les Pyrénées",
    "Pilgrim office on Rue de la Citadelle; collect the credencial before leaving.",
);

const STAGES: [StageRecord; 33] = [
    stage("Roncesvalles", 43.0092, -1.3195, 24.2, "Hotel Roncesvalles", "The Route Napoléon over the Pyrenees; the hardest climb of the whole Camino."),
    stage("Zubiri", 42.9306, -1.5036, 21.9, "Hostería de Zubiri", "Beech forests and a steep, stony descent into the Arga valley."),
    stage("Pamplona", 42.8182, -1.6443, 20.4, "Hotel Castillo de Javier", "Enter the old town through the Portal de Francia."),
    stage("Puente la Reina", 42.6722, -1.8144, 24.0, "Hotel Jakue", "Over the Alto del Perdón to the Romanesque bridge that names the town."),
    stage("Estella", 42.6713, -2.0321, 21.9, "Hotel Yerri", "Rolling vineyards and the medieval village of Cirauqui."),
    stage("Los Arcos", 42.5692, -2.1925, 21.3, "Hostal Ezequiel", "Wine fountain at Irache, then long open farmland."),
    stage("Logroño", 42.4650, -2.4456, 27.6, "Hotel Calle Mayor", "Cross into La Rioja; tapas on Calle Laurel."),
    stage("Nájera", 42.4164, -2.7297, 29.0, "Hotel Duques de Nájera", "Long day through vineyards past Navarrete."),
    stage("Santo Domingo de la Calzada", 42.4406, -2.9536, 20.7, "Parador de Santo Domingo", "The cathedral keeps a live hen and rooster."),
    stage("Belorado", 42.4203, -3.1903, 22.0, "Hotel Jacobeo", "Enter Castilla y León at Redecilla del Camino."),
    stage("San Juan de Ortega", 42.3758, -3.4372, 23.9, "Casa Rural La Henera", "Climb through the oak woods of the Montes de Oca."),
    stage("Burgos", 42.3408, -3.7044, 25.8, "Hotel Norte y Londres", "Past the Atapuerca archaeological site to the Gothic cathedral."),
    stage("Hornillos del Camino", 42.3386, -3.9247, 21.0, "Casa Rural de Sol a Sol", "First day on the open Meseta."),
    stage("Castrojeriz", 42.2886, -4.1381, 19.9, "Posada Emebed", "Through the ruined arches of the San Antón convent."),
    stage("Frómista", 42.2672, -4.4058, 24.7, "Hotel San Martín", "Climb the Alto de Mostelares, then follow the Canal de Castilla."),
    stage("Carrión de los Condes", 42.3381, -4.6033, 18.8, "Hostal Santiago", "Templar church at Villalcázar de Sirga."),
    stage("Terradillos de los Templarios", 42.3622, -4.8917, 26.3, "Albergue Jacques de Molay", "Seventeen kilometres without a village on the old Roman road."),
    stage("Bercianos del Real Camino", 42.3878, -5.1456, 23.2, "Hotel Rural Bercianos", "Halfway point of the Camino at Sahagún."),
    stage("Mansilla de las Mulas", 42.4986, -5.4161, 26.3, "Hostal Alberguería del Camino", "Tree-lined senda through quiet Meseta villages."),
    stage("León", 42.5987, -5.5671, 18.5, "Hotel Real Colegiata San Isidoro", "Rest in León; the cathedral glass is not to be missed."),
    stage("San Martín del Camino", 42.4939, -5.8092, 25.9, "Albergue Vieira", "Leave León along the N-120 senda."),
    stage("Astorga", 42.4589, -6.0564, 23.7, "Hotel Vía de la Plata", "Cross the long medieval bridge at Hospital de Órbigo."),
    stage("Rabanal del Camino", 42.4817, -6.2847, 20.5, "Hostal El Refugio", "Maragato villages and the first climb toward the Montes de León."),
    stage("Ponferrada", 42.5461, -6.5906, 32.1, "Hotel El Castillo", "Leave a stone at the Cruz de Ferro, the highest point of the route."),
    stage("Villafranca del Bierzo", 42.6064, -6.8108, 24.2, "Hotel San Francisco", "Vineyards of the Bierzo and the Puerta del Perdón."),
    stage("O Cebreiro", 42.7078, -7.0436, 27.8, "Casa Navarro", "Steep climb into Galicia and its pre-Romanesque pallozas."),
    stage("Triacastela", 42.7561, -7.2394, 20.8, "Complexo Xacobeo", "Down from the Alto do Poio through chestnut groves."),
    stage("Sarria", 42.7806, -7.4147, 18.3, "Hotel Alfonso IX", "Last chance to start and still earn the Compostela."),
    stage("Portomarín", 42.8075, -7.6158, 22.4, "Hotel Ferramenteiro", "Pass the 100 km marker; the town was moved stone by stone."),
    stage("Palas de Rei", 42.8731, -7.8689, 24.8, "Hotel Complejo La Cabaña", "Climb out of the Miño valley past the Sierra Ligonde."),
    stage("Arzúa", 42.9264, -8.1636, 28.8, "Hotel Arzúa", "Pulpo at Melide and famous local cheese in Arzúa."),
    stage("O Pedrouzo", 42.9050, -8.3611, 19.3, "Hotel O Pino", "Eucalyptus woods on a short penultimate day."),
    stage("Santiago de Compostela", 42.8806, -8.5446, 20.0, "Hotel Hostal dos Reis Católicos", "Pilgrim Mass in the cathedral and the Compostela at the pilgrim office."),
];

const WAYPOINTS: [&[WaypointRecord]; 33] = [
    &[
        village("Orisson", 43.1156, -1.2186, 7.8, "Refuge, bar, last water before the col"),
        village("Col de Lepoeder", 43.0246, -1.3003, 19.9, "Summit, 1,430 m"),
    ],
    &[
        village("Burguete", 42.9903, -1.3356, 2.8, "Cafés, cash machine"),
        village("Espinal", 42.9797, -1.3644, 6.5, "Bakery, shop"),
        village("Alto de Erro", 42.9531, -1.4475, 16.0, "Food truck in season"),
    ],
    &[
        village("Larrasoaña", 42.9003, -1.5408, 5.5, "Albergue, shop"),
        village("Trinidad de Arre", 42.8364, -1.6097, 16.5, "Bridge and basilica"),
    ],
    &[
        village("Cizur Menor", 42.7878, -1.6797, 4.8, "Bars, pharmacy"),
        landmark("Alto del Perdón", 13.0),
        village("Obanos", 42.6794, -1.7853, 21.0, "Bar, fountain"),
    ],
    &[
        village("Cirauqui", 42.6761, -1.8911, 7.6, "Roman road and bridge"),
        village("Lorca", 42.6731, -1.9658, 13.2, "Bar, albergue"),
    ],
    &[
        village("Irache", 42.6519, -2.0439, 2.8, "Wine fountain, monastery"),
        village("Villamayor de Monjardín", 42.6297, -2.1036, 9.3, "Last services for 12 km"),
    ],
    &[
        village("Sansol", 42.5511, -2.2653, 6.9, "Bar"),
        village("Viana", 42.5153, -2.3711, 18.3, "Full services"),
    ],
    &[
        village("Navarrete", 42.4294, -2.5619, 12.6, "Full services"),
        village("Ventosa", 42.4047, -2.6264, 19.5, "Albergue, bar"),
    ],
    &[
        village("Azofra", 42.4239, -2.8017, 5.8, "Bars, shop"),
        village("Cirueña", 42.4122, -2.8986, 15.0, "Bar by the golf course"),
    ],
    &[
        village("Grañón", 42.4503, -3.0253, 6.7, "Parish albergue"),
        village("Redecilla del Camino", 42.4381, -3.0647, 10.6, "Tourist office, bar"),
    ],
    &[
        village("Villafranca Montes de Oca", 42.3894, -3.3083, 12.0, "Last services before the woods"),
        landmark("Alto de la Pedraja", 15.5),
    ],
    &[
        village("Atapuerca", 42.3775, -3.5072, 6.2, "Archaeological site, bars"),
        village("Cardeñuela Riopico", 42.3650, -3.5939, 12.8, "Bar, albergue"),
    ],
    &[
        village("Tardajos", 42.3486, -3.8175, 10.5, "Shop, bar"),
        village("Rabé de las Calzadas", 42.3408, -3.8353, 12.4, "Fountain, last bar before the Meseta"),
    ],
    &[
        village("Hontanas", 42.3122, -4.0447, 10.9, "Bars, albergues"),
        village("San Antón", 42.2953, -4.1086, 16.5, "Convent ruins"),
    ],
    &[
        village("Itero de la Vega", 42.2869, -4.2567, 10.7, "Shop, bar"),
        village("Boadilla del Camino", 42.2589, -4.3464, 18.9, "Albergue with garden"),
    ],
    &[
        village("Población de Campos", 42.2708, -4.4467, 3.5, "Bar"),
        village("Villalcázar de Sirga", 42.3158, -4.5431, 13.6, "Templar church, restaurants"),
    ],
    &[
        village("Calzadilla de la Cueza", 42.3292, -4.8036, 17.2, "First services after 17 km"),
        village("Ledigos", 42.3547, -4.8656, 23.4, "Albergue, bar"),
    ],
    &[
        village("Sahagún", 42.3706, -5.0292, 13.3, "Full services, halfway certificate"),
        landmark("Puente de Canto", 14.0),
    ],
    &[
        village("El Burgo Ranero", 42.4231, -5.2192, 7.5, "Shops, bars"),
        village("Reliegos", 42.4731, -5.3553, 20.5, "Bar Elvis"),
    ],
    &[
        village("Puente Villarente", 42.5428, -5.4567, 6.0, "Full services"),
        village("Arcahueja", 42.5636, -5.5175, 11.0, "Bar"),
    ],
    &[
        village("La Virgen del Camino", 42.5811, -5.6408, 7.5, "Sanctuary, shops"),
        village("Villadangos del Páramo", 42.5181, -5.7658, 19.9, "Bars, shop"),
    ],
    &[
        village("Hospital de Órbigo", 42.4636, -5.8803, 7.0, "Medieval bridge, full services"),
        village("San Justo de la Vega", 42.4567, -6.0153, 20.0, "Bars"),
    ],
    &[
        village("Murias de Rechivaldo", 42.4592, -6.1097, 4.7, "Bar"),
        village("Santa Catalina de Somoza", 42.4553, -6.1569, 9.0, "Bar, albergue"),
        village("El Ganso", 42.4631, -6.2058, 13.3, "Cowboy bar"),
    ],
    &[
        village("Foncebadón", 42.4914, -6.3442, 5.5, "Bars, albergues"),
        village("Cruz de Ferro", 42.4886, -6.3617, 7.6, "Iron cross, 1,505 m"),
        village("El Acebo", 42.4986, -6.4561, 17.0, "Bars, steep descent follows"),
        village("Molinaseca", 42.5383, -6.5197, 25.6, "River beach, restaurants"),
    ],
    &[
        village("Camponaraya", 42.5783, -6.6694, 9.5, "Wine cooperative"),
        village("Cacabelos", 42.6000, -6.7247, 15.0, "Full services"),
    ],
    &[
        village("Trabadelo", 42.6492, -6.8817, 10.0, "Bars, shop"),
        village("Las Herrerías", 42.6706, -6.9856, 20.5, "Last bar before the climb"),
    ],
    &[
        village("Liñares", 42.7019, -7.0753, 3.0, "Bar"),
        village("Alto do Poio", 42.7128, -7.1394, 8.5, "Bar at the pass"),
        village("Fonfría", 42.7275, -7.1578, 12.0, "Albergue, bar"),
    ],
    &[
        village("A Balsa", 42.7583, -7.2522, 2.5, "Chapel"),
        village("San Xil", 42.7567, -7.2783, 6.0, "Fountain"),
    ],
    &[
        village("Barbadelo", 42.7694, -7.4431, 4.3, "Romanesque church, bar"),
        village("Ferreiros", 42.7897, -7.5408, 13.0, "Restaurant"),
    ],
    &[
        village("Gonzar", 42.8236, -7.6925, 8.0, "Bars, albergue"),
        village("Ligonde", 42.8594, -7.7861, 16.4, "Albergue"),
    ],
    &[
        village("Melide", 42.9142, -8.0147, 14.8, "Pulpería Ezequiel, full services"),
        village("Boente", 42.9236, -8.0753, 20.4, "Bar"),
    ],
    &[
        village("Salceda", 42.9219, -8.2622, 11.0, "Bars"),
        village("Santa Irene", 42.9094, -8.3264, 16.0, "Fountain, albergue"),
    ],
    &[
        village("Lavacolla", 42.8983, -8.4444, 10.0, "Bars, near the airport"),
        village("Monte do Gozo", 42.8872, -8.4983, 15.0, "First view of the cathedral spires"),
    ],
];

static ITINERARY: Lazy<Vec<Destination>> = Lazy::new(|| {
    let mut cumulative = 0.0;
    STAGES
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            cumulative += record.day_km;
            Destination {
                day: idx as u32 + 1,
                name: record.name.to_string(),
                lodging: record.lodging.to_string(),
                coordinate: Coordinate::new(record.lat, record.lon),
                day_distance_km: record.day_km,
                cumulative_distance_km: (cumulative * 10.0_f64).round() / 10.0,
                description: record.description.to_string(),
            }
        })
        .collect()
});

/// Every stage in walking order. Day numbers start at 1.
pub fn itinerary() -> &'static [Destination] {
    &ITINERARY
}

pub fn day_count() -> u32 {
    STAGES.len() as u32
}

pub fn destination(day: u32) -> Option<&'static Destination> {
    let idx = (day as usize).checked_sub(1)?;
    itinerary().get(idx)
}

pub fn route_detail(day: u32) -> Option<RouteDetail> {
    let idx = (day as usize).checked_sub(1)?;
    let end = destination(day)?;

    let start = if idx == 0 {
        LocationPoint {
            name: DEPARTURE.name.to_string(),
            coordinate: Some(Coordinate::new(DEPARTURE.lat, DEPARTURE.lon)),
            distance_from_start_km: Some(0.0),
            details: Some(DEPARTURE.description.to_string()),
        }
    } else {
        let previous = &itinerary()[idx - 1];
        LocationPoint {
            name: previous.name.clone(),
            coordinate: Some(previous.coordinate),
            distance_from_start_km: Some(0.0),
            details: Some(previous.lodging.clone()),
        }
    };

    let waypoints = WAYPOINTS[idx]
        .iter()
        .map(|record| LocationPoint {
            name: record.name.to_string(),
            coordinate: record.coordinate,
            distance_from_start_km: Some(record.km_from_start),
            details: record.details.map(str::to_string),
        })
        .collect();

    Some(RouteDetail {
        day,
        start: Some(start),
        waypoints,
        end: Some(destination_point(end)),
    })
}

/// One point per stage, used for the whole-itinerary overview.
pub fn overview_points() -> Vec<LocationPoint> {
    itinerary()
        .iter()
        .map(|dest| LocationPoint {
            distance_from_start_km: Some(dest.cumulative_distance_km),
            ..destination_point(dest)
        })
        .collect()
}

/// Start, waypoints and end flattened in walking order.
pub fn detail_points(detail: &RouteDetail) -> Vec<LocationPoint> {
    detail
        .start
        .iter()
        .chain(detail.waypoints.iter())
        .chain(detail.end.iter())
        .cloned()
        .collect()
}

fn destination_point(dest: &Destination) -> LocationPoint {
    LocationPoint {
        name: dest.name.clone(),
        coordinate: Some(dest.coordinate),
        distance_from_start_km: Some(dest.day_distance_km),
        details: Some(dest.lodging.clone()),
    }
}
