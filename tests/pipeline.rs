use std::io::Write;

use delivery_dashboard::cleaner::clean;
use delivery_dashboard::filter::FilterOptions;
use delivery_dashboard::loader::{load_and_clean, load_raw};
use delivery_dashboard::reports;
use delivery_dashboard::types::RawRecord;
use delivery_dashboard::views::{DelivererView, RestaurantView};

const HEADER: &str = "ID,Delivery_person_ID,Delivery_person_Age,Delivery_person_Ratings,Restaurant_latitude,Restaurant_longitude,Delivery_location_latitude,Delivery_location_longitude,Order_Date,Time_Orderd,Time_Order_picked,Weatherconditions,Road_traffic_density,Vehicle_condition,Type_of_order,Type_of_vehicle,multiple_deliveries,Festival,City,Time_taken(min)";

const ROWS: &[&str] = &[
    "0x4607 ,INDORES13DEL02 ,37,4.9,22.745049,75.892471,22.765049,75.912471,19-03-2022,11:30:00,11:45:00,conditions Sunny,High ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 24",
    "0xb379 ,BANGRES18DEL02 ,34,4.5,12.913041,77.683237,13.043041,77.813237,25-03-2022,19:45:00,19:50:00,conditions Stormy,Jam ,2,Snack ,scooter ,1,No ,Metropolitian ,(min) 33",
    "0x5d6d ,BANGRES19DEL01 ,23,4.4,12.914264,77.6784,12.924264,77.6884,19-03-2022,08:30:00,08:45:00,conditions Sandstorms,Low ,0,Drinks ,motorcycle ,1,No ,Urban ,(min) 26",
    "0x7a6a ,COIMBRES13DEL02 ,38,4.7,11.003669,76.976494,11.053669,77.026494,05-04-2022,18:00:00,18:10:00,conditions Sunny,Medium ,0,Buffet ,motorcycle ,1,No ,Metropolitian ,(min) 21",
    "0x70a2 ,CHENRES12DEL01 ,32,4.6,12.972793,80.249982,13.012793,80.289982,26-03-2022,13:30:00,13:45:00,conditions Cloudy,High ,1,Snack ,scooter ,1,Yes ,Metropolitian ,(min) 30",
    "0x9bb4 ,HYDRES09DEL03 ,NaN ,NaN ,17.431668,78.408321,17.461668,78.438321,11-03-2022,21:20:00,21:30:00,conditions Fog,Jam ,0,Buffet ,motorcycle ,1,No ,Metropolitian ,(min) 40",
    "0x95b4 ,RANCHIRES15DEL01 ,35,4.2,23.357804,85.325146,23.387804,85.355146,12-03-2022,NaN ,NaN ,conditions NaN,NaN ,1,Meal ,motorcycle ,1,No ,Metropolitian ,(min) 32",
];

const UNRATED_ROWS: &[&str] = &[
    "0x1 ,D1 ,30,4.0,22.74,75.89,22.76,75.91,19-03-2022,11:30:00,11:45:00,conditions Sunny,Jam ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 24",
    "0x2 ,D1 ,30,5.0,22.74,75.89,22.76,75.91,19-03-2022,12:30:00,12:45:00,conditions Sunny,Jam ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 28",
    "0x3 ,D1 ,30,NaN ,22.74,75.89,22.76,75.91,19-03-2022,13:30:00,13:45:00,conditions Sunny,Jam ,2,Snack ,motorcycle ,0,No ,Urban ,(min) 31",
];

fn dataset() -> tempfile::NamedTempFile {
    dataset_with(ROWS)
}

fn dataset_with(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn cleans_filters_and_aggregates_dataset() {
    let file = dataset();
    let (data, report) = load_and_clean(file.path()).unwrap();
    assert_eq!(report.total_rows, 7);
    assert_eq!(data.len(), 5);
    assert!(data.iter().all(|r| r.traffic != "NaN" && r.city != "NaN"));

    let opts = FilterOptions::from_cli(
        "06-04-2022",
        &["Low".into(), "Medium".into(), "High".into(), "Jam".into()],
        &[],
    )
    .unwrap();
    let data = opts.apply(data);
    assert_eq!(data.len(), 5);

    let share = reports::traffic_order_share(&data);
    let total: f64 = share.iter().map(|r| r.share).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let deliverers = DelivererView::build(&data);
    assert_eq!(deliverers.metrics.oldest_age, Some(38));
    assert_eq!(deliverers.metrics.youngest_age, Some(23));
    assert_eq!(deliverers.slowest[0].city, "Metropolitian");
    assert_eq!(deliverers.slowest[0].max_time_min, 33);

    let restaurants = RestaurantView::build(&data);
    assert_eq!(restaurants.metrics.unique_deliverers, 5);
    assert_eq!(restaurants.metrics.festival_avg_time, Some(30.0));
    assert!(restaurants.metrics.festival_std_time.unwrap().is_nan());
}

#[test]
fn cleaned_export_cleans_to_the_same_records() {
    let file = dataset();
    let raw = load_raw(file.path()).unwrap();
    let once = clean(&raw).unwrap();

    let exported: Vec<RawRecord> = once.iter().map(RawRecord::from).collect();
    let twice = clean(&exported).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn unrated_orders_do_not_poison_rating_averages() {
    let file = dataset_with(UNRATED_ROWS);
    let (data, report) = load_and_clean(file.path()).unwrap();
    assert_eq!(report.kept_rows, 3);

    let view = DelivererView::build(&data);
    assert_eq!(view.ratings.len(), 1);
    assert_eq!(view.ratings[0].mean_rating, 4.5);
    let jam = &view.rating_by_traffic[0];
    assert_eq!(jam.group, "Jam");
    assert_eq!(jam.count, 2);
    assert_eq!(jam.mean, 4.5);
    assert!((jam.std - 0.5f64.sqrt()).abs() < 1e-12);
}
