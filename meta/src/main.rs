fn main() {
    multiversx_sc_meta_lib::cli_main::<weighted_escrow::AbiProvider>();
}
