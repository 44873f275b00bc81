mod conversion_props;
