//! Retail: products and stores, linked sales and inventory movements.

use crate::{
    dist::{render_date, round2, DateWindow, IntRange, MoneyRange},
    error::SimResult,
    generator::{Cluster, DomainModel},
    ids::IdFormat,
    links::{LinkPair, LinkSpec},
    name_generator::NameGenerator,
    record::Record,
    rng::SimRng,
    types::Domain,
};
use serde::{Deserialize, Serialize};

use super::{non_empty, strings};

// ── Records ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "Product_ID")]
    pub pid: String,
    #[serde(alias = "Product_Name")]
    pub name: String,
    #[serde(alias = "Category")]
    pub category: String,
    #[serde(alias = "Sub_Category")]
    pub subcat: String,
    #[serde(alias = "Brand")]
    pub brand: String,
    #[serde(alias = "Cost_Price")]
    pub cost: f64,
    #[serde(alias = "Selling_Price")]
    pub selling: f64,
    #[serde(alias = "Shelf_Life_Days")]
    pub shelf_life: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(alias = "Store_ID")]
    pub sid: String,
    #[serde(alias = "Store_Name")]
    pub name: String,
    #[serde(alias = "Location")]
    pub location: String,
    #[serde(alias = "Manager_Name")]
    pub manager: String,
    #[serde(alias = "Store_Type")]
    pub stype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(alias = "Sale_ID")]
    pub sale_id: String,
    #[serde(alias = "Product_ID")]
    pub pid: String,
    #[serde(alias = "Store_ID")]
    pub sid: String,
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Units_Sold")]
    pub units: i64,
    #[serde(alias = "Discount")]
    pub discount: f64,
    #[serde(alias = "Final_Price")]
    pub final_price: f64,
    #[serde(alias = "Revenue")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(alias = "Inventory_ID")]
    pub inv_id: String,
    #[serde(alias = "Product_ID")]
    pub pid: String,
    #[serde(alias = "Opening_Stock")]
    pub opening: i64,
    #[serde(alias = "Received_Stock")]
    pub received: i64,
    #[serde(alias = "Sold_Stock")]
    pub sold: i64,
    #[serde(alias = "Closing_Stock")]
    pub closing: i64,
}

impl Record for Product {
    const TABLE: &'static str = "retail_products";
    const KEY: &'static str = "pid";
    const STREAM: &'static str = "product";
    const ID_FORMAT: IdFormat = IdFormat::new("P", 4);

    fn id(&self) -> &str {
        &self.pid
    }
}

impl Record for Store {
    const TABLE: &'static str = "retail_stores";
    const KEY: &'static str = "sid";
    const STREAM: &'static str = "store";
    const ID_FORMAT: IdFormat = IdFormat::new("STR", 3);

    fn id(&self) -> &str {
        &self.sid
    }
}

impl Record for Sale {
    const TABLE: &'static str = "retail_sales";
    const KEY: &'static str = "sale_id";
    const STREAM: &'static str = "sales";
    const ID_FORMAT: IdFormat = IdFormat::new("S", 4);

    fn id(&self) -> &str {
        &self.sale_id
    }
}

impl Record for Inventory {
    const TABLE: &'static str = "retail_inventory";
    const KEY: &'static str = "inv_id";
    const STREAM: &'static str = "inventory";
    const ID_FORMAT: IdFormat = IdFormat::new("I", 4);

    fn id(&self) -> &str {
        &self.inv_id
    }
}

// ── Vocabulary & distributions ────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVocab {
    pub name: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetailParams {
    pub categories:  Vec<CategoryVocab>,
    pub brands:      Vec<String>,
    pub store_types: Vec<String>,
    pub store_names: Vec<String>,
    pub locations:   Vec<String>,

    pub cost_price:       MoneyRange,
    pub selling_price:    MoneyRange,
    pub shelf_life_days:  IntRange,
    pub units:            IntRange,
    pub discount:         MoneyRange,
    pub opening_stock:    IntRange,
    pub received_stock:   IntRange,
    pub dates:            DateWindow,
}

impl Default for RetailParams {
    fn default() -> Self {
        let category = |name: &str, subs: &[&str]| CategoryVocab {
            name: name.to_string(),
            subcategories: strings(subs),
        };
        Self {
            categories: vec![
                category("Beverages", &["Tea", "Juice", "Soda"]),
                category("Snacks", &["Nuts", "Chips", "Cookies"]),
                category("Dairy", &["Cheese", "Butter", "Milk"]),
                category("Personal Care", &["Soap", "Shampoo", "Lotion"]),
            ],
            brands: strings(&[
                "General Goods", "East End Shop", "Blue Mountain", "EcoFoods", "DailyMart",
                "FreshCO",
            ]),
            store_types: strings(&["Small", "Medium", "Large", "Franchise"]),
            store_names: strings(&[
                "Prime Retail Hub", "CityMart Superstore", "GreenLeaf Market",
                "Daily Basket Outlet", "UrbanFresh Store", "Metro Value Center",
                "Sunrise Grocery Point", "FreshWorld Hypermart", "QuickPick Convenience",
                "EcoShop Department Store", "ValueTown Retail",
            ]),
            locations: strings(&[
                "New Delhi", "Mumbai", "Bengaluru", "Chennai", "Kolkata", "Hyderabad", "Pune",
                "Jaipur", "Kochi", "Ahmedabad", "Lucknow", "Chandigarh", "Bhopal", "Indore",
                "Surat", "Visakhapatnam", "Nagpur", "Gurugram", "Noida", "Mysore",
                "Coimbatore", "Thiruvananthapuram",
            ]),
            cost_price:      MoneyRange::new(20.0, 200.0),
            selling_price:   MoneyRange::new(200.0, 800.0),
            shelf_life_days: IntRange::new(60, 365),
            units:           IntRange::new(1, 20),
            discount:        MoneyRange::new(0.10, 0.50),
            opening_stock:   IntRange::new(50, 200),
            received_stock:  IntRange::new(10, 50),
            dates:           DateWindow::default(),
        }
    }
}

// ── Model ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RetailModel {
    pub params: RetailParams,
}

impl RetailModel {
    pub fn new(params: RetailParams) -> Self {
        Self { params }
    }
}

impl DomainModel for RetailModel {
    type MasterA = Product;
    type MasterB = Store;
    type DependentA = Sale;
    type DependentB = Inventory;

    const DOMAIN: Domain = Domain::Retail;
    const LINK: LinkSpec = LinkSpec {
        table:    "retail_mem",
        column_a: "sale_id",
        column_b: "inv_id",
        format_a: Sale::ID_FORMAT,
        format_b: Inventory::ID_FORMAT,
    };

    fn validate(&self) -> SimResult<()> {
        let p = &self.params;
        non_empty("retail.categories", &p.categories)?;
        for c in &p.categories {
            non_empty("retail.categories.subcategories", &c.subcategories)?;
        }
        non_empty("retail.brands", &p.brands)?;
        non_empty("retail.store_types", &p.store_types)?;
        non_empty("retail.store_names", &p.store_names)?;
        non_empty("retail.locations", &p.locations)
    }

    fn mint_master_a(&self, pid: String, seq: u64, rng: &mut SimRng) -> Product {
        let p = &self.params;
        let category = rng.pick(&p.categories);
        let subcat = rng.pick(&category.subcategories).clone();
        Product {
            pid,
            name: format!("{subcat}_{seq}"),
            category: category.name.clone(),
            subcat,
            brand: rng.pick(&p.brands).clone(),
            cost: p.cost_price.sample(rng),
            selling: p.selling_price.sample(rng),
            shelf_life: p.shelf_life_days.sample(rng),
        }
    }

    fn mint_master_b(&self, sid: String, _seq: u64, rng: &mut SimRng) -> Store {
        let p = &self.params;
        Store {
            sid,
            name: rng.pick(&p.store_names).clone(),
            location: rng.pick(&p.locations).clone(),
            manager: NameGenerator::full_name(rng),
            stype: rng.pick(&p.store_types).clone(),
        }
    }

    fn build_dependents(
        &self,
        product: &Product,
        store: &Store,
        ids: &LinkPair,
        rng: &mut SimRng,
    ) -> (Sale, Inventory) {
        let p = &self.params;
        let units = p.units.sample(rng);
        let discount = p.discount.sample(rng);
        // The discount is a flat amount off the unit selling price.
        let final_price = round2(product.selling - discount);
        let revenue = round2(units as f64 * final_price);

        let sale = Sale {
            sale_id: ids.a.clone(),
            pid: product.pid.clone(),
            sid: store.sid.clone(),
            date: render_date(p.dates.sample(rng)),
            units,
            discount,
            final_price,
            revenue,
        };

        let opening = p.opening_stock.sample(rng);
        let received = p.received_stock.sample(rng);
        let inventory = Inventory {
            inv_id: ids.b.clone(),
            pid: product.pid.clone(),
            opening,
            received,
            sold: units,
            closing: opening + received - units,
        };

        (sale, inventory)
    }

    fn progress_line(c: &Cluster<Self>) -> String {
        format!(
            "Added sale {} for product {} at store {}",
            c.dependent_a.sale_id, c.master_a.pid, c.master_b.sid
        )
    }
}
