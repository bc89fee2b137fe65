pub mod consignments;
