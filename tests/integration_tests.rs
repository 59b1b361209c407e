use boston_rental_trends::demographics::{
    DemographicRecord, age_by_zip, filter_boston, income_by_zip, join_demographics,
    renter_share_by_zip,
};
use boston_rental_trends::loader::{self, AgeRow, IncomeRow, TenureRow, month_end_columns};
use boston_rental_trends::rentals::{boston_rentals, split_by_availability};
use boston_rental_trends::report::{format_age, format_currency, format_percentage, format_rent};
use boston_rental_trends::zips::ZipAllowList;
use std::fs;
use std::path::PathBuf;

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_demographic_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let age_path = write_csv(
        &dir,
        "median_age.csv",
        "name,B01002A001\nMassachusetts,39.6\n02108,34.5\n02199,33.1\n",
    );
    let income_path = write_csv(
        &dir,
        "median_income.csv",
        "name,B19013001\n2108,95000\n2110,120000\n",
    );
    let tenure_path = write_csv(
        &dir,
        "tenure_b25003.csv",
        "name,B25003001,B25003003\n2108,1000,600\n2110,0,0\n",
    );

    let age_rows: Vec<AgeRow> = loader::load_rows(&age_path).unwrap();
    let income_rows: Vec<IncomeRow> = loader::load_rows(&income_path).unwrap();
    let tenure_rows: Vec<TenureRow> = loader::load_rows(&tenure_path).unwrap();

    let age = age_by_zip(&age_rows).unwrap();
    let income = income_by_zip(&income_rows).unwrap();
    let renters = renter_share_by_zip(&tenure_rows).unwrap();
    let joined = join_demographics(&age, &income, &renters);

    // Only 2108 survives the inner joins: 2199 has no income or tenure row,
    // 2110 has no age row.
    assert_eq!(joined.len(), 1);
    let record = &joined[0];
    assert_eq!(record.zip, "2108");
    assert_eq!(record.median_age, Some(34.5));
    assert_eq!(record.median_income, Some(95000.0));
    assert_eq!(record.percent_renters, Some(60.0));

    assert_eq!(format_age(record.median_age), "34.5 years");
    assert_eq!(format_currency(record.median_income), "$95,000");
    assert_eq!(format_percentage(record.percent_renters), "60.0%");

    let boston = filter_boston(&joined, &ZipAllowList::boston());
    assert_eq!(boston.len(), 1);
}

#[test]
fn test_rental_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let months = month_end_columns(2024).join(",");
    let full_year = vec!["2000.00"; 12].join(",");
    let empty_year = ",".repeat(11);
    let content = format!(
        "RegionID,SizeRank,RegionName,State,City,StateName,{months}\n\
         1,10,2108,MA,Boston,Massachusetts,{full_year}\n\
         2,20,2199,MA,Boston,Massachusetts,{empty_year}\n\
         3,30,9999,XX,Elsewhere,Elsewhere,{full_year}\n"
    );
    let path = write_csv(&dir, "Zillow_Renter_Zip_Code.csv", &content);

    let rows = loader::load_rentals(&path, 2024).unwrap();
    assert_eq!(rows.len(), 3);

    let matched = boston_rentals(rows, &ZipAllowList::boston());
    // 9999 is excluded regardless of data completeness.
    assert_eq!(matched.len(), 2);
    assert!(matched.iter().all(|r| r.zip != 9999));

    let (with_data, missing) = split_by_availability(matched);

    assert_eq!(with_data.len(), 1);
    assert_eq!(with_data[0].zip, 2108);
    assert_eq!(with_data[0].avg_rent_2024, Some(2000.0));
    assert_eq!(format_rent(with_data[0].avg_rent_2024), "$2,000.00");

    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].zip, 2199);
    assert_eq!(missing[0].avg_rent_2024, None);
    assert_eq!(format_rent(missing[0].avg_rent_2024), "N/A");
}

#[test]
fn test_custom_allow_list_feeds_both_filters() {
    let dir = tempfile::tempdir().unwrap();
    let zips_path = write_csv(&dir, "zips.json", "[2110]");
    let allow_list = ZipAllowList::load(zips_path.to_str().unwrap()).unwrap();

    let months = month_end_columns(2024).join(",");
    let year = vec!["1800"; 12].join(",");
    let content = format!(
        "RegionID,SizeRank,RegionName,State,City,StateName,{months}\n\
         1,10,2108,MA,Boston,Massachusetts,{year}\n\
         2,20,2110,MA,Boston,Massachusetts,{year}\n"
    );
    let zillow_path = write_csv(&dir, "Zillow_Renter_Zip_Code.csv", &content);

    let rows = loader::load_rentals(&zillow_path, 2024).unwrap();
    let matched = boston_rentals(rows, &allow_list);
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].zip, 2110);

    let records = vec![
        DemographicRecord {
            zip: "2108".to_string(),
            median_age: Some(34.5),
            median_income: Some(95000.0),
            percent_renters: Some(60.0),
        },
        DemographicRecord {
            zip: "2110".to_string(),
            median_age: Some(38.0),
            median_income: Some(120000.0),
            percent_renters: Some(55.0),
        },
    ];
    let boston = filter_boston(&records, &allow_list);
    assert_eq!(boston.len(), 1);
    assert_eq!(boston[0].zip, "2110");
}
