fn main() {
    std::process::exit(ebc_drv::run());
}
